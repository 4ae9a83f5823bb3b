use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rpn_rs::{EvalOptions, RehashStrategy, Session};

/// rpn - evaluate postfix arithmetic and assignment expressions
#[derive(Parser, Debug)]
#[command(name = "rpn")]
#[command(about = "Evaluate postfix expressions, one per line", long_about = None)]
struct Args {
    /// File of expressions, one per line (reads stdin if not provided)
    input: Option<PathBuf>,

    /// Evaluate a single expression instead of reading lines
    #[arg(short, long, conflicts_with = "input")]
    expression: Option<String>,

    /// How the symbol table re-places entries when it grows
    #[arg(long, value_enum, default_value_t = Rehash::Probe)]
    rehash: Rehash,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Rehash {
    /// Probe forward for a free slot
    Probe,
    /// Home slot only; growing fails on a collision
    Direct,
}

impl From<Rehash> for RehashStrategy {
    fn from(rehash: Rehash) -> Self {
        match rehash {
            Rehash::Probe => RehashStrategy::Probe,
            Rehash::Direct => RehashStrategy::Direct,
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG wins; otherwise warn, or debug with --verbose
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> io::Result<()> {
    let mut session = Session::with_options(EvalOptions {
        rehash: args.rehash.into(),
    });
    let stdout = io::stdout();

    if let Some(expression) = args.expression {
        let report = session.evaluate(&expression);
        print!("{}", report);
        return Ok(());
    }

    match args.input {
        Some(path) => {
            let file = File::open(&path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
            })?;
            session.run(BufReader::new(file), stdout.lock())?;
        }
        None => {
            session.run(io::stdin().lock(), stdout.lock())?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rpn: {}", e);
            ExitCode::FAILURE
        }
    }
}
