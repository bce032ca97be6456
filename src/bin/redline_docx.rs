//! Command-line front end for the redline engine.
//!
//! ```text
//! redline-docx compare original.docx modified.docx -o redlined.docx
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use redline_docx::options::{CompareOptions, Granularity};
use redline_docx::{compare, ooxml};

#[derive(Parser, Debug)]
#[command(name = "redline-docx", version, about = "Compare two Word documents and emit a redlined copy")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two `.docx` files and write a redlined output.
    Compare {
        original: PathBuf,
        modified: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Rewrite matching delete/insert pairs into move markers.
        #[arg(long)]
        detect_moves: bool,

        #[arg(long)]
        ignore_case: bool,

        #[arg(long)]
        ignore_whitespace: bool,

        #[arg(long)]
        ignore_formatting: bool,

        #[arg(long, value_enum, default_value_t = GranularityArg::Word)]
        granularity: GranularityArg,

        /// Print the comparison statistics as JSON to stdout after writing.
        #[arg(long)]
        json_stats: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GranularityArg {
    Character,
    Word,
    Sentence,
    Paragraph,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Character => Granularity::Character,
            GranularityArg::Word => Granularity::Word,
            GranularityArg::Sentence => Granularity::Sentence,
            GranularityArg::Paragraph => Granularity::Paragraph,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    }
}

fn run(command: Command) -> redline_docx::Result<()> {
    match command {
        Command::Compare {
            original,
            modified,
            output,
            detect_moves,
            ignore_case,
            ignore_whitespace,
            ignore_formatting,
            granularity,
            json_stats,
        } => {
            let original_doc = ooxml::read_docx(&original)?;
            let modified_doc = ooxml::read_docx(&modified)?;

            let options = CompareOptions {
                detect_moves,
                ignore_case,
                ignore_whitespace,
                ignore_formatting,
                granularity: granularity.into(),
                ..CompareOptions::default()
            };

            let result = compare::compare(&original_doc, &modified_doc, &options);
            ooxml::write_docx(&result.document, &output)?;

            if json_stats {
                let json = serde_json::to_string_pretty(&result.statistics)
                    .map_err(|e| redline_docx::Error::Other(e.to_string()))?;
                println!("{json}");
            } else {
                eprintln!(
                    "{} insertions, {} deletions, {} moves, {:.1}% changed",
                    result.statistics.insertions,
                    result.statistics.deletions,
                    result.statistics.moves,
                    result.statistics.change_percentage(),
                );
            }

            Ok(())
        },
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "redline_docx=info",
        1 => "redline_docx=debug",
        _ => "redline_docx=trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
