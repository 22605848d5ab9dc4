//! Wall-clock timing of a closure

use std::time::Instant;

/// Run `f` and return its elapsed wall time in milliseconds with its result.
pub fn timed<T, F>(f: F) -> (u128, T)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed().as_millis();
    log::debug!("Timed section took {} ms", elapsed);
    (elapsed, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timed_returns_result() {
        let (_, value) = timed(|| 6 * 7);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_timed_measures_sleep() {
        let (elapsed, ()) = timed(|| std::thread::sleep(Duration::from_millis(15)));
        assert!(elapsed >= 15);
    }
}
