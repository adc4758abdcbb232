//! Zone layout: where talent tables live inside the workbook.
//!
//! Character-sheet workbooks scatter talent tables across several
//! worksheets, each table a contiguous block of rows starting with a header
//! row. The layout names those blocks; it is serde-able so the settings
//! file can override the defaults for differently arranged sheets.

use serde::{Deserialize, Serialize};

/// A contiguous block of worksheet rows holding one talent table.
///
/// Rows are 1-based and inclusive, as shown in the spreadsheet UI. The
/// first row of a zone is its header row; data rows follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// First row of the zone (the header row).
    pub start: u32,
    /// Last row of the zone.
    pub end: u32,
}

impl Zone {
    /// Zone spanning rows `start..=end`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Header labels naming the four talent columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLabels {
    /// Talent display name column.
    pub name: String,
    /// Total-level column.
    pub total_level: String,
    /// Dice-expression column.
    pub dice: String,
    /// Quick-access classification column.
    pub rank: String,
}

impl Default for HeaderLabels {
    fn default() -> Self {
        // The sheets this tool was written for are French.
        Self {
            name: "Talents".to_string(),
            total_level: "Niv. Tot.".to_string(),
            dice: "Dés".to_string(),
            rank: "Classification".to_string(),
        }
    }
}

/// The zones of one worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetZones {
    /// Worksheet name.
    pub name: String,
    /// Row zones within the worksheet, read top to bottom.
    pub zones: Vec<Zone>,
}

impl SheetZones {
    /// Worksheet `name` with the given `(start, end)` row spans.
    pub fn new(name: &str, spans: &[(u32, u32)]) -> Self {
        Self {
            name: name.to_string(),
            zones: spans.iter().map(|&(s, e)| Zone::new(s, e)).collect(),
        }
    }
}

/// Which worksheets carry talent zones, in read order, plus the header
/// labels used to locate the columns within each zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneLayout {
    /// Worksheets walked in order; missing ones are skipped.
    pub sheets: Vec<SheetZones>,
    /// Header labels for the talent columns.
    pub headers: HeaderLabels,
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self {
            sheets: vec![
                SheetZones::new("Comp", &[(4, 20), (35, 43), (52, 55)]),
                SheetZones::new("D1", &[(5, 49)]),
                SheetZones::new("D2", &[(5, 49)]),
                SheetZones::new("D3", &[(5, 49)]),
                SheetZones::new("CH", &[(5, 48)]),
                SheetZones::new(
                    "Passions+autres",
                    &[(4, 46), (82, 85), (90, 105), (106, 112)],
                ),
            ],
            headers: HeaderLabels::default(),
        }
    }
}
