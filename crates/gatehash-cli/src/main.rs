//! Gatehash CLI - canonicalize receipts and verify their integrity digests.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gatehash_canonical::DEFAULT_MAX_DEPTH;
use gatehash_core::{Verifier, VerifierConfig};

mod commands;
mod errors;
mod input;
mod logging;
mod output;

use commands::{batch, canonicalize, digest, verify, Status};

#[derive(Parser)]
#[command(name = "gatehash")]
#[command(about = "Receipt canonicalization and integrity verification CLI")]
struct Cli {
    /// Maximum nesting depth accepted in a receipt
    #[arg(long, global = true, env = "GATEHASH_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Treat receipts larger than SIZE bytes as malformed (default: unlimited)
    #[arg(long, global = true, env = "GATEHASH_MAX_SIZE")]
    max_size: Option<usize>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show canonical bytes for an input receipt
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Compute the SHA-256 digest of a receipt's canonical form
    Digest {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify a receipt against an expected digest
    Verify {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Expected lowercase or uppercase hex digest
        #[arg(long, short = 'e')]
        expected: Option<String>,
        /// Exit with error code unless the receipt is verified
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify one receipt per line of a file
    VerifyBatch {
        /// File with one JSON receipt per line
        receipts: String,
        /// File with the expected digest for each receipt line (blank line = none)
        #[arg(long)]
        digests: Option<String>,
        /// Exit with error code unless every receipt is verified
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Stop after N receipts (default: unlimited)
        #[arg(long)]
        max_receipts: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = VerifierConfig::default()
        .with_max_depth(cli.max_depth)
        .with_max_input_bytes(cli.max_size);
    let verifier = Verifier::new(config);

    let result = match cli.command {
        Commands::Canonicalize { input } => canonicalize::run(&verifier, input),
        Commands::Digest { input, json } => digest::run(&verifier, input, json),
        Commands::Verify {
            input,
            expected,
            strict,
            json,
        } => verify::run(&verifier, input, expected, strict, json),
        Commands::VerifyBatch {
            receipts,
            digests,
            strict,
            json,
            max_receipts,
        } => batch::run(&verifier, receipts, digests, strict, json, max_receipts),
    };

    match result {
        Ok(Status::Accepted) => ExitCode::SUCCESS,
        Ok(Status::Rejected) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
