//! dtscmp — compare or merge two device-tree source files.
//!
//! Without flags the two files are parsed and structurally compared; exit
//! code 0 means equal, 1 means they differ. With `-m` the second tree is
//! merged into the first under the `-e`/`-p` policy flags and the result
//! is printed to stdout.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use dts_format::render;
use dts_tree::{Document, MergeOptions, compare, merge};

// Exit codes: 0/1 carry the comparison outcome, anything above is an error.
const EXIT_SUCCESS: u8 = 0;
const EXIT_TREES_DIFFER: u8 = 1;
// 2 is clap's usage-error exit code.
const EXIT_PARSE_ERROR: u8 = 3;
const EXIT_IO_ERROR: u8 = 4;
const EXIT_MERGE_ERROR: u8 = 5;

/// Compare or merge device-tree source files.
#[derive(Parser, Debug)]
#[command(name = "dtscmp", version)]
struct Cli {
    /// Merge FILE_B into FILE_A and print the result instead of comparing
    #[arg(short = 'm', long)]
    merge: bool,

    /// With -m: deep-copy items only present in FILE_B into the result
    #[arg(short = 'e', long = "add-from-other", requires = "merge")]
    add_from_other: bool,

    /// With -m: drop items of FILE_A that are missing from FILE_B
    #[arg(short = 'p', long = "purge-not-in-other", requires = "merge")]
    purge_not_in_other: bool,

    /// First file (merge target)
    file_a: PathBuf,

    /// Second file (merge source)
    file_b: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    ExitCode::from(run(Cli::parse()))
}

/// Returns the process exit code; `main` stays a trivial wrapper.
fn run(cli: Cli) -> u8 {
    let (mut doc_a, doc_b) = match (load(&cli.file_a), load(&cli.file_b)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(code), _) | (_, Err(code)) => return code,
    };

    if cli.merge {
        let mut options = MergeOptions::new();
        if cli.add_from_other {
            options = options.add_from_other();
        }
        if cli.purge_not_in_other {
            options = options.purge_not_in_other();
        }
        if let Err(err) = merge(&mut doc_a, &doc_b, options) {
            eprintln!("merge failed: {}", err);
            return EXIT_MERGE_ERROR;
        }
        print!("{}", render(&doc_a));
        return EXIT_SUCCESS;
    }

    if compare(&doc_a, &doc_b) {
        EXIT_SUCCESS
    } else {
        EXIT_TREES_DIFFER
    }
}

/// Read and parse one file, reporting failures to stderr.
fn load(path: &Path) -> Result<Document, u8> {
    let filename = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|err| {
        eprintln!("failed to read {}: {}", filename, err);
        EXIT_IO_ERROR
    })?;
    dts_parse::parse(&source).map_err(|err| {
        err.write_report(&filename, &source, std::io::stderr());
        EXIT_PARSE_ERROR
    })
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dts_parse=warn,dts_tree=warn,dts_format=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
