use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use tw_sheet::Settings;

pub fn run(workbook: Option<&Path>, ranked: bool, settings: &Settings) -> Result<(), String> {
    let catalog = super::load_catalog(workbook, settings)?;

    if catalog.is_empty() {
        println!("  No talents found.");
        return Ok(());
    }

    if ranked {
        let groups = catalog.ranked_names(4, 5);
        if groups.is_empty() {
            println!("  No talents carry a quick-access rank.");
            return Ok(());
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Rank", "Talents"]);
        for (rank, names) in &groups {
            table.add_row(vec![rank.to_string(), names.join("\n")]);
        }
        println!("{table}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Talent", "Dice", "Karma", "Rank"]);
    for name in catalog.names() {
        if let Some(talent) = catalog.get(&name) {
            table.add_row(vec![
                talent.name.clone(),
                talent.expression.to_string(),
                if talent.karma { "yes" } else { "-" }.to_string(),
                talent.rank.map_or_else(|| "-".to_string(), |r| r.to_string()),
            ]);
        }
    }
    println!("{table}");
    println!();
    println!("  {} talents", catalog.len());

    Ok(())
}
