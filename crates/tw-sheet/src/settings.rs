//! User settings: last workbook, default karma die, zone layout override.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SheetResult;
use crate::layout::ZoneLayout;

/// Persisted application settings.
///
/// The only on-disk state the application keeps; everything else is rebuilt
/// from the workbook on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Workbook opened last; reopened on launch when still present.
    pub workbook: Option<PathBuf>,
    /// Karma die token the selector starts on.
    pub karma_die: String,
    /// Where the talent zones live in the workbook.
    pub layout: ZoneLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workbook: None,
            karma_die: "D8".to_string(),
            layout: ZoneLayout::default(),
        }
    }
}

impl Settings {
    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> SheetResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> SheetResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Default settings location under the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("talentwurf").join("settings.json"))
    }
}
