//! Progress bars over the outer loops of the solvers
//!
//! Disabled bars are `ProgressBar::hidden()`: the loops tick them
//! unconditionally and nothing is drawn.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{msg:>12} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}";

/// Bar labelled `label`, drawn on stderr when `enabled`.
///
/// The loop that ticks it sets its length.
pub fn bar(label: &'static str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    match ProgressStyle::default_bar().template(TEMPLATE) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(err) => log::warn!("Invalid progress template: {}", err),
    }
    pb.set_message(label);
    pb
}
