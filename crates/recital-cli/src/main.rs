//! recital CLI — assess transcripts and drill sets from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "recital", version, about = "Pronunciation assessment engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess one transcript against its reference sentence
    Assess {
        /// The sentence the learner was asked to say
        #[arg(long)]
        reference: String,

        /// What the speech recognizer heard
        #[arg(long, default_value = "")]
        transcript: String,

        /// Alignment strategy: greedy, global (default: from config)
        #[arg(long)]
        strategy: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Assess every drill in a drill set and write a JSON report
    Batch {
        /// Path to .toml drill set or directory
        #[arg(long)]
        drills: PathBuf,

        /// Alignment strategy: greedy, global (default: from config)
        #[arg(long)]
        strategy: Option<String>,

        /// Output directory (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Filter by tags (comma-separated)
        #[arg(long)]
        filter: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two batch reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Score change (in points) below which a drill counts as unchanged
        #[arg(long, default_value = "5")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate drill set TOML files
    Validate {
        /// Path to drill set file or directory
        #[arg(long)]
        drills: PathBuf,
    },

    /// Create starter config and example drill set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recital=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            reference,
            transcript,
            strategy,
            format,
            config,
        } => commands::assess::execute(reference, transcript, strategy, format, config),
        Commands::Batch {
            drills,
            strategy,
            output,
            filter,
            config,
        } => commands::batch::execute(drills, strategy, output, filter, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { drills } => commands::validate::execute(drills),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
