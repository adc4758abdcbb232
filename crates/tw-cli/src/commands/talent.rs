use std::path::Path;

use colored::Colorize;

use tw_core::KarmaDie;
use tw_sheet::Settings;

pub fn run(
    workbook: Option<&Path>,
    name: &str,
    karma: bool,
    seed: Option<u64>,
    settings: &Settings,
) -> Result<(), String> {
    let catalog = super::load_catalog(workbook, settings)?;

    let Some(talent) = catalog.get(name) else {
        println!("  Talent \"{name}\" not found in the workbook.");
        return Ok(());
    };

    let karma_die = if karma && talent.karma {
        Some(KarmaDie::parse(&settings.karma_die).map_err(|e| e.to_string())?)
    } else {
        if karma {
            println!("  \"{name}\" has no karma option; rolling without.");
        }
        None
    };

    let mut rng = super::make_rng(seed);
    let trace = talent.expression.roll_with_karma(karma_die, &mut rng);

    println!(
        "  Result for \"{}\" (total level {}/{}):",
        talent.name.bold(),
        talent.total_level,
        talent.expression,
    );
    println!("  {}", trace.total.to_string().bold());
    println!("  {} {}", "Details:".dimmed(), trace.details());

    Ok(())
}
