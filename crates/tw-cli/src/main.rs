//! CLI frontend for the Talentwurf talent roller.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Talentwurf — roll character-sheet talents with exploding dice",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a dice expression directly
    Roll {
        /// Dice expression, e.g. "3D6+2"
        expression: String,

        /// Karma die to append, e.g. D12
        #[arg(short, long)]
        karma: Option<String>,

        /// RNG seed for reproducible rolls (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// List the talents found in a workbook
    List {
        /// Show the quick-access grouping instead of all names
        #[arg(short, long)]
        ranked: bool,

        /// Workbook to load (defaults to the one in settings)
        #[arg(short, long)]
        workbook: Option<PathBuf>,
    },

    /// Show one talent's details
    Show {
        /// Talent display name (exact match)
        name: String,

        /// Workbook to load (defaults to the one in settings)
        #[arg(short, long)]
        workbook: Option<PathBuf>,
    },

    /// Look up a talent and roll its dice
    Talent {
        /// Talent display name (exact match)
        name: String,

        /// Add the karma die (honored only for karma-eligible talents)
        #[arg(short, long)]
        karma: bool,

        /// RNG seed for reproducible rolls (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Workbook to load (defaults to the one in settings)
        #[arg(short, long)]
        workbook: Option<PathBuf>,
    },

    /// Launch the interactive terminal UI
    Tui {
        /// Workbook to load on startup (defaults to the one in settings)
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// RNG seed for reproducible rolls (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = commands::load_settings();

    let result = match cli.command {
        Commands::Roll {
            expression,
            karma,
            seed,
        } => commands::roll::run(&expression, karma.as_deref(), seed),
        Commands::List { ranked, workbook } => {
            commands::list::run(workbook.as_deref(), ranked, &settings)
        }
        Commands::Show { name, workbook } => {
            commands::show::run(workbook.as_deref(), &name, &settings)
        }
        Commands::Talent {
            name,
            karma,
            seed,
            workbook,
        } => commands::talent::run(workbook.as_deref(), &name, karma, seed, &settings),
        Commands::Tui { workbook, seed } => commands::tui::run(workbook.as_deref(), seed, &settings),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
