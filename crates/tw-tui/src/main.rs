//! Standalone TUI binary for Talentwurf.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use tw_sheet::Settings;

#[derive(Parser)]
#[command(
    name = "tw-tui",
    about = "Terminal UI for rolling character-sheet talents",
    version
)]
struct Args {
    /// Workbook to load on startup (defaults to the one in settings)
    #[arg(long)]
    workbook: Option<PathBuf>,

    /// RNG seed for reproducible rolls (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let mut settings = match Settings::default_path() {
        Some(path) => Settings::load(&path).unwrap_or_default(),
        None => Settings::default(),
    };
    if let Some(workbook) = args.workbook {
        settings.workbook = Some(workbook);
    }

    let mut app = tw_tui::app::App::new(settings, args.seed);
    let result = tw_tui::terminal::run(&mut app);
    app.save_settings().ok();

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
