//! Workbook loading: walk the zone layout and feed rows to the catalog.

use std::path::Path;

use calamine::{Data, Range, Reader};

use tw_core::TalentCatalog;

use crate::error::SheetResult;
use crate::layout::{HeaderLabels, Zone, ZoneLayout};

/// Column indices located from a zone's header row.
struct Columns {
    name: u32,
    total_level: u32,
    dice: u32,
    rank: u32,
}

/// Load a workbook into a freshly built catalog.
///
/// Zones are walked in layout order. Missing worksheets and zones whose
/// header row lacks a required label are skipped with a debug event; bad
/// rows are the catalog's business. The caller decides when to swap the
/// result in, so a failed load never disturbs a catalog already in use.
pub fn load_talents(path: &Path, layout: &ZoneLayout) -> SheetResult<TalentCatalog> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let mut catalog = TalentCatalog::new();

    for sheet in &layout.sheets {
        let range = match workbook.worksheet_range(&sheet.name) {
            Ok(range) => range,
            Err(e) => {
                tracing::debug!(sheet = %sheet.name, %e, "worksheet skipped");
                continue;
            }
        };
        for zone in &sheet.zones {
            scan_zone(&mut catalog, &range, *zone, &layout.headers);
        }
    }

    tracing::debug!(talents = catalog.len(), "workbook ingested");
    Ok(catalog)
}

/// Scan one zone: locate the header columns, then ingest the data rows.
fn scan_zone(catalog: &mut TalentCatalog, range: &Range<Data>, zone: Zone, headers: &HeaderLabels) {
    // Rows are 1-based; a zone needs a header row plus at least one data row.
    if zone.start == 0 || zone.end <= zone.start {
        return;
    }
    let Some(columns) = locate_columns(range, zone.start - 1, headers) else {
        tracing::debug!(zone.start, zone.end, "zone skipped: header labels not found");
        return;
    };

    for row in (zone.start + 1)..=zone.end {
        let row0 = row - 1;
        // Blank filler rows between tables are normal; skip them quietly.
        let Some(name) = cell_str(range.get_value((row0, columns.name))) else {
            continue;
        };
        catalog.ingest_row(
            &name,
            cell_num(range.get_value((row0, columns.total_level))),
            cell_str(range.get_value((row0, columns.dice))).as_deref(),
            cell_num(range.get_value((row0, columns.rank))),
        );
    }
}

/// Find the four labeled columns in the header row. All four must be
/// present for the zone to count.
fn locate_columns(range: &Range<Data>, header_row0: u32, headers: &HeaderLabels) -> Option<Columns> {
    let (_, max_col) = range.end()?;
    let mut name = None;
    let mut total_level = None;
    let mut dice = None;
    let mut rank = None;

    for col in 0..=max_col {
        let Some(label) = cell_str(range.get_value((header_row0, col))) else {
            continue;
        };
        if label == headers.name {
            name.get_or_insert(col);
        } else if label == headers.total_level {
            total_level.get_or_insert(col);
        } else if label == headers.dice {
            dice.get_or_insert(col);
        } else if label == headers.rank {
            rank.get_or_insert(col);
        }
    }

    Some(Columns {
        name: name?,
        total_level: total_level?,
        dice: dice?,
        rank: rank?,
    })
}

/// Text content of a cell, trimmed; non-string cells yield nothing.
fn cell_str(cell: Option<&Data>) -> Option<String> {
    match cell {
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// Numeric content of a cell; strings are not coerced.
fn cell_num(cell: Option<&Data>) -> Option<f64> {
    match cell {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    /// A worksheet shaped like the real sheets: a header row at 1-based
    /// row 4, data under it, plus unrelated noise elsewhere.
    fn talent_range() -> Range<Data> {
        let mut range = Range::new((0, 0), (12, 6));
        // Header row (1-based row 4 → index 3), shuffled column order.
        range.set_value((3, 1), s("Talents"));
        range.set_value((3, 2), s("Niv. Tot."));
        range.set_value((3, 4), s("Dés"));
        range.set_value((3, 5), s("Classification"));
        // Valid row.
        range.set_value((4, 1), s("Stealth"));
        range.set_value((4, 2), Data::Float(10.0));
        range.set_value((4, 4), s("3D6"));
        range.set_value((4, 5), Data::Float(2.0));
        // Karma variant.
        range.set_value((5, 1), s("Melee (D)"));
        range.set_value((5, 2), Data::Int(9));
        range.set_value((5, 4), s("2D8+1"));
        range.set_value((5, 5), Data::Int(1));
        // Level is text: rejected.
        range.set_value((6, 1), s("Dodge"));
        range.set_value((6, 2), s("n/a"));
        range.set_value((6, 4), s("D10"));
        // No dice expression: rejected.
        range.set_value((7, 1), s("Haggle"));
        range.set_value((7, 2), Data::Float(3.0));
        // Blank name row: skipped.
        range.set_value((8, 2), Data::Float(4.0));
        range.set_value((8, 4), s("D6"));
        // Below the zone: ignored.
        range.set_value((11, 1), s("Climbing"));
        range.set_value((11, 2), Data::Float(5.0));
        range.set_value((11, 4), s("D8"));
        range
    }

    #[test]
    fn scans_zone_rows_into_catalog() {
        let range = talent_range();
        let mut catalog = TalentCatalog::new();
        scan_zone(
            &mut catalog,
            &range,
            Zone::new(4, 10),
            &HeaderLabels::default(),
        );

        assert_eq!(catalog.len(), 2);
        let stealth = catalog.get("Stealth").unwrap();
        assert_eq!(stealth.expression.to_string(), "3D6");
        assert_eq!(stealth.rank, Some(2));
        let melee = catalog.get("Melee (D)").unwrap();
        assert!(melee.karma);
        assert_eq!(melee.total_level, 9.0);
        assert!(catalog.get("Climbing").is_none());
    }

    #[test]
    fn zone_without_headers_is_skipped() {
        let range = talent_range();
        let mut catalog = TalentCatalog::new();
        // Row 5 is data, not headers.
        scan_zone(
            &mut catalog,
            &range,
            Zone::new(5, 10),
            &HeaderLabels::default(),
        );
        assert!(catalog.is_empty());
    }

    #[test]
    fn header_labels_are_configurable() {
        let mut range = Range::new((0, 0), (2, 4));
        range.set_value((0, 0), s("Skill"));
        range.set_value((0, 1), s("Level"));
        range.set_value((0, 2), s("Dice"));
        range.set_value((0, 3), s("Tier"));
        range.set_value((1, 0), s("Stealth"));
        range.set_value((1, 1), Data::Float(4.0));
        range.set_value((1, 2), s("2D6"));
        range.set_value((1, 3), Data::Float(1.0));

        let headers = HeaderLabels {
            name: "Skill".to_string(),
            total_level: "Level".to_string(),
            dice: "Dice".to_string(),
            rank: "Tier".to_string(),
        };
        let mut catalog = TalentCatalog::new();
        scan_zone(&mut catalog, &range, Zone::new(1, 2), &headers);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn cell_coercions() {
        assert_eq!(cell_str(Some(&s("  x  "))), Some("x".to_string()));
        assert_eq!(cell_str(Some(&s("   "))), None);
        assert_eq!(cell_str(Some(&Data::Float(3.0))), None);
        assert_eq!(cell_str(None), None);
        assert_eq!(cell_num(Some(&Data::Float(2.5))), Some(2.5));
        assert_eq!(cell_num(Some(&Data::Int(7))), Some(7.0));
        assert_eq!(cell_num(Some(&s("7"))), None);
        assert_eq!(cell_num(Some(&Data::Empty)), None);
    }
}
