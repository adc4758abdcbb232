use std::path::Path;

use colored::Colorize;

use tw_sheet::Settings;

pub fn run(workbook: Option<&Path>, name: &str, settings: &Settings) -> Result<(), String> {
    let catalog = super::load_catalog(workbook, settings)?;

    // A miss is an answer for the user, not a process failure.
    let Some(talent) = catalog.get(name) else {
        println!("  Talent \"{name}\" not found in the workbook.");
        return Ok(());
    };

    println!("  {}", talent.name.bold());
    println!("    dice:        {}", talent.expression);
    println!("    total level: {}", talent.total_level);
    println!(
        "    karma:       {}",
        if talent.karma { "eligible" } else { "no" }
    );
    if let Some(rank) = talent.rank {
        println!("    rank:        {rank}");
    }

    Ok(())
}
