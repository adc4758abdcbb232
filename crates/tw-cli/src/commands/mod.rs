pub mod list;
pub mod roll;
pub mod show;
pub mod talent;
pub mod tui;

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;

use tw_core::TalentCatalog;
use tw_sheet::Settings;

/// Read settings from the default location; a broken or absent file falls
/// back to the defaults.
pub fn load_settings() -> Settings {
    let Some(path) = Settings::default_path() else {
        return Settings::default();
    };
    match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::debug!(%e, "settings unreadable, using defaults");
            Settings::default()
        }
    }
}

/// Resolve the workbook path: CLI flag first, then the settings file.
fn resolve_workbook(flag: Option<&Path>, settings: &Settings) -> Result<PathBuf, String> {
    flag.map(Path::to_path_buf)
        .or_else(|| settings.workbook.clone())
        .ok_or_else(|| {
            "no workbook given; pass --workbook or set one in the settings file".to_string()
        })
}

/// Load a catalog for the commands that need one.
fn load_catalog(flag: Option<&Path>, settings: &Settings) -> Result<TalentCatalog, String> {
    let path = resolve_workbook(flag, settings)?;
    tw_sheet::load_talents(&path, &settings.layout)
        .map_err(|e| format!("failed to load {}: {e}", path.display()))
}

/// Seeded RNG when requested, OS entropy otherwise.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
