use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use teststub::core::error::EXIT_INTERNAL;
use teststub::core::{ExclusionSet, GeneratorConfig, StubGenerator};
use teststub::formatters::StubStyle;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "teststub",
    version,
    about = "Generate placeholder Python test modules for every function in a source tree",
    after_help = "Exit codes: 0 success, 1 internal error, 2 usage, 3 syntax error, \
                  4 invalid UTF-8, 5 I/O error, 6 output directory unusable"
)]
struct Cli {
    /// Source directory to scan
    #[arg(value_name = "SOURCE_DIR")]
    source_dir: PathBuf,

    /// Where stubs are written (default: SOURCE_DIR with `Test` appended)
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Stub layout
    #[arg(short, long, value_enum, default_value_t = StyleArg::Class)]
    style: StyleArg,

    /// Extra directory-name fragment to skip (repeatable)
    #[arg(short, long, value_name = "FRAGMENT")]
    exclude: Vec<String>,

    /// Stop at the first file that fails instead of carrying on
    #[arg(long)]
    fail_fast: bool,

    /// Log debug details to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum StyleArg {
    /// unittest.TestCase class per function
    Class,
    /// Bare test function asserting a non-None result
    Assert,
}

impl From<StyleArg> for StubStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Class => StubStyle::Class,
            StyleArg::Assert => StubStyle::Assert,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(code) => exit_code(code),
        Err(err) => {
            eprintln!("Error: {err}");
            let code = err
                .downcast_ref::<teststub::core::GenerateError>()
                .map(|err| err.exit_code())
                .unwrap_or(EXIT_INTERNAL);
            exit_code(code)
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<i32> {
    let Cli {
        source_dir,
        output_dir,
        style,
        exclude,
        fail_fast,
        ..
    } = cli;

    let start_time = Instant::now();

    let exclusions = exclude
        .into_iter()
        .map(|fragment| fragment.trim().to_string())
        .fold(ExclusionSet::default(), |set, fragment| set.with_fragment(fragment));

    let mut config = GeneratorConfig::new(source_dir)
        .with_style(style.into())
        .with_exclusions(exclusions)
        .with_fail_fast(fail_fast);
    if let Some(output_dir) = output_dir {
        config = config.with_output_dir(output_dir);
    }

    let mut generator = StubGenerator::new(config)?;
    let summary = generator.run()?;

    println!(
        "Generated {} stub file(s), skipped {} module(s) without functions, {} failure(s) in {:.2}s",
        summary.written.len(),
        summary.skipped.len(),
        summary.failures.len(),
        start_time.elapsed().as_secs_f64()
    );
    for failure in &summary.failures {
        eprintln!("  failed: {failure}");
    }

    Ok(summary.exit_code())
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
