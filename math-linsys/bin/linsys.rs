use anyhow::Context;
use clap::{Parser, ValueEnum};
use math_linsys::{
    Algorithm, CholeskyStrategy, Kernel, LinsysError, RunConfig, Tolerance, benchmark,
    find_limit, simple_test,
};
use std::path::PathBuf;
use std::process;

/// First size tried by the find-limit mode
const FIND_LIMIT_START: usize = 100;

#[derive(Parser, Debug)]
#[command(
    name = "linsys",
    about = "Solve generated dense linear systems with Cholesky or Gaussian elimination"
)]
struct Cli {
    /// Test procedure to run
    #[arg(long, value_enum, default_value_t = TestMode::Simple)]
    test_mode: TestMode,

    /// Cholesky traversal order [default: column]
    #[arg(short, long, value_enum)]
    method: Option<MethodChoice>,

    /// Use the vectorized Cholesky kernel
    #[arg(long)]
    jit: bool,

    /// Seed of the generated system [default: 20]
    #[arg(long)]
    seed: Option<u64>,

    /// Size of the generated system [default: 10000]
    #[arg(long)]
    size: Option<usize>,

    /// Solver to run [default: cholesky]
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmChoice>,

    /// Log every step and draw progress bars
    #[arg(short, long)]
    verbose: bool,

    /// Fail on nan/inf in a factor instead of propagating them
    #[arg(long)]
    strict: bool,

    /// JSON run configuration; command line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving benchmark records [default: results]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Largest size tried by the find-limit mode
    #[arg(long, default_value_t = 12_800)]
    max_size: usize,

    /// Absolute tolerance of the correctness checks [default: 1e-3]
    #[arg(long)]
    atol: Option<f64>,

    /// Relative tolerance of the correctness checks [default: 1e-3]
    #[arg(long)]
    rtol: Option<f64>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TestMode {
    Simple,
    FindLimit,
    Benchmark,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MethodChoice {
    Row,
    Column,
    Diagonal,
}

impl From<MethodChoice> for CholeskyStrategy {
    fn from(choice: MethodChoice) -> Self {
        match choice {
            MethodChoice::Row => CholeskyStrategy::Row,
            MethodChoice::Column => CholeskyStrategy::Column,
            MethodChoice::Diagonal => CholeskyStrategy::Diagonal,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AlgorithmChoice {
    Cholesky,
    Gauss,
}

impl From<AlgorithmChoice> for Algorithm {
    fn from(choice: AlgorithmChoice) -> Self {
        match choice {
            AlgorithmChoice::Cholesky => Algorithm::Cholesky,
            AlgorithmChoice::Gauss => Algorithm::Gauss,
        }
    }
}

impl Cli {
    /// Configuration file values, overridden by the flags that were given
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)
                .with_context(|| format!("cannot load configuration {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(method) = self.method {
            config.method = method.into();
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm.into();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.jit {
            config.kernel = Kernel::Vectorized;
        }
        if self.strict {
            config.strict = true;
        }
        if self.verbose {
            config.progress = true;
        }
        config.tolerance = Tolerance::new(
            self.atol.unwrap_or(config.tolerance.atol),
            self.rtol.unwrap_or(config.tolerance.rtol),
        );

        Ok(config)
    }
}

/// Exit code for a failed run: 1 when the numbers are at fault, 2 otherwise
fn exit_code(err: &LinsysError) -> i32 {
    if err.is_numerical_error() { 1 } else { 2 }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Error
        })
        .init();

    let config = match args.run_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(2);
        }
    };

    let outcome = match args.test_mode {
        TestMode::Simple => simple_test(&config).map(|report| {
            println!(
                "{} {}x{}: factor {} ms, solve {} ms, factor correct: {}, solution correct: {}",
                report.algorithm,
                report.size,
                report.size,
                report.factor_time,
                report.solve_time,
                report.factor_correct,
                report.solution_correct
            );
            report.is_correct()
        }),
        TestMode::FindLimit => {
            find_limit(&config, FIND_LIMIT_START, args.max_size).map(|timings| {
                for (size, time) in timings {
                    println!("SIZE: {size}x{size}  Cholesky execution time: {time} ms");
                }
                true
            })
        }
        TestMode::Benchmark => benchmark(&config).map(|record| {
            println!(
                "{} {}x{} (seed {}): {} ms -> {}",
                record.algorithm,
                record.size,
                record.size,
                record.seed,
                record.time,
                config.output_dir.join(record.file_name()).display()
            );
            true
        }),
    };

    match outcome {
        Ok(true) => Ok(()),
        Ok(false) => {
            eprintln!("Error: verification failed");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(exit_code(&err));
        }
    }
}
