//! Workbook ingestion for Talentwurf.
//!
//! Owns everything about the spreadsheet: which worksheets and row zones
//! hold talent tables, how header labels map to columns, and how cells
//! become catalog rows. Also persists the small settings file. The core
//! never sees a workbook; it only sees validated rows.

pub mod error;
pub mod layout;
pub mod loader;
pub mod settings;

pub use error::{SheetError, SheetResult};
pub use layout::{HeaderLabels, SheetZones, Zone, ZoneLayout};
pub use loader::load_talents;
pub use settings::Settings;
