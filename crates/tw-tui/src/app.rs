//! Application state: the session owns the catalog, settings, and RNG.
//!
//! Every key handler receives this state explicitly; there are no ambient
//! globals. The catalog is replaced atomically on reload — a failed load
//! keeps the previous talents usable.

use rand::SeedableRng;
use rand::rngs::StdRng;

use tw_core::{KarmaDie, RollTrace, TalentCatalog};
use tw_sheet::Settings;

/// Karma die choices offered by the selector.
pub const KARMA_DICE: &[&str] = &["D8", "D10", "D12"];

/// How many rolls the history keeps.
const HISTORY_LIMIT: usize = 50;

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The talent entry field.
    Input,
    /// The quick-access buttons.
    Quick,
}

/// One past roll, newest first in [`App::history`].
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Talent name or raw expression that was rolled.
    pub label: String,
    /// The trace it produced.
    pub trace: RollTrace,
}

/// The latest outcome shown in the result panel.
#[derive(Debug, Clone, Default)]
pub struct ResultView {
    /// Context line, e.g. `Result for "Stealth" (total level 10/3D6):`.
    pub heading: String,
    /// Big total; empty when the last action produced no roll.
    pub total: String,
    /// Joined trace details.
    pub details: String,
}

/// Main application state for the TUI.
pub struct App {
    /// Persisted settings: workbook path, karma die, zone layout.
    pub settings: Settings,
    /// The loaded catalog; `None` until a workbook loads successfully.
    pub catalog: Option<TalentCatalog>,
    /// Index into [`KARMA_DICE`].
    pub karma_index: usize,
    /// Quick-access groups `(rank, names)`, rebuilt per catalog load.
    pub quick: Vec<(i64, Vec<String>)>,
    /// Cursor into the flattened quick-access list.
    pub quick_cursor: usize,
    /// Current text in the talent entry.
    pub input: String,
    /// Autocomplete hits for the current input.
    pub hits: Vec<String>,
    /// Hit filled in by the next Tab press.
    pub hit_index: usize,
    /// Talent waiting on the karma yes/no answer.
    pub pending_karma: Option<String>,
    /// Latest roll outcome.
    pub result: ResultView,
    /// Past rolls, newest first.
    pub history: Vec<HistoryEntry>,
    /// Which panel has focus.
    pub focus: Focus,
    /// Status line (load outcomes and the like).
    pub status: String,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// RNG driving all rolls.
    rng: StdRng,
}

impl App {
    /// Create the app and try to load the settings' workbook.
    pub fn new(settings: Settings, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let karma_index = KARMA_DICE
            .iter()
            .position(|die| *die == settings.karma_die)
            .unwrap_or(0);

        let mut app = Self {
            settings,
            catalog: None,
            karma_index,
            quick: Vec::new(),
            quick_cursor: 0,
            input: String::new(),
            hits: Vec::new(),
            hit_index: 0,
            pending_karma: None,
            result: ResultView::default(),
            history: Vec::new(),
            focus: Focus::Input,
            status: String::new(),
            should_quit: false,
            rng,
        };
        app.reload();
        app
    }

    /// Selected karma die token.
    pub fn karma_die(&self) -> &'static str {
        KARMA_DICE[self.karma_index]
    }

    /// Cycle the karma die selector.
    pub fn next_karma_die(&mut self) {
        self.karma_index = (self.karma_index + 1) % KARMA_DICE.len();
    }

    /// (Re)load the workbook named in the settings.
    ///
    /// The previous catalog stays in place when the load fails.
    pub fn reload(&mut self) {
        let Some(path) = self.settings.workbook.clone() else {
            self.status = "no workbook configured — start with --workbook <path>".to_string();
            return;
        };
        match tw_sheet::load_talents(&path, &self.settings.layout) {
            Ok(catalog) => {
                self.status = format!("{} talents from {}", catalog.len(), path.display());
                self.quick = catalog.ranked_names(4, 5).into_iter().collect();
                self.quick_cursor = 0;
                self.catalog = Some(catalog);
                self.refresh_hits();
            }
            Err(e) => {
                self.status = format!("load failed, keeping previous talents: {e}");
            }
        }
    }

    /// Recompute autocomplete hits for the current input: case-insensitive
    /// prefix match over all names, like the original entry widget.
    pub fn refresh_hits(&mut self) {
        self.hit_index = 0;
        self.hits.clear();
        let Some(catalog) = &self.catalog else {
            return;
        };
        let prefix = self.input.to_lowercase();
        self.hits = catalog
            .names()
            .into_iter()
            .filter(|name| name.to_lowercase().starts_with(&prefix))
            .collect();
    }

    /// Fill the input with the next autocomplete hit.
    pub fn cycle_hit(&mut self) {
        if self.hits.is_empty() {
            return;
        }
        self.input = self.hits[self.hit_index].clone();
        self.hit_index = (self.hit_index + 1) % self.hits.len();
    }

    /// The completion remainder previewed after the typed input, if any.
    pub fn hit_preview(&self) -> Option<String> {
        let hit = self.hits.first()?;
        if self.input.is_empty() || hit == &self.input {
            return None;
        }
        Some(hit.chars().skip(self.input.chars().count()).collect())
    }

    /// Total number of quick-access entries across all groups.
    pub fn quick_len(&self) -> usize {
        self.quick.iter().map(|(_, names)| names.len()).sum()
    }

    /// Name under the quick-access cursor.
    pub fn quick_selected(&self) -> Option<&str> {
        let mut index = self.quick_cursor;
        for (_, names) in &self.quick {
            if index < names.len() {
                return Some(&names[index]);
            }
            index -= names.len();
        }
        None
    }

    /// Move the quick-access cursor by one.
    pub fn quick_move(&mut self, forward: bool) {
        let len = self.quick_len();
        if len == 0 {
            return;
        }
        self.quick_cursor = if forward {
            (self.quick_cursor + 1) % len
        } else {
            (self.quick_cursor + len - 1) % len
        };
    }

    /// Roll whatever is typed in the entry (Enter).
    pub fn roll_input(&mut self) {
        let name = self.input.trim().to_string();
        if !name.is_empty() {
            self.request_roll(&name);
        }
    }

    /// Roll the quick-access selection.
    pub fn roll_quick(&mut self) {
        if let Some(name) = self.quick_selected().map(str::to_string) {
            // Mirror the original buttons: selecting one also fills the entry.
            self.input = name.clone();
            self.refresh_hits();
            self.request_roll(&name);
        }
    }

    /// Start a roll: prompt for karma when eligible, else roll at once.
    pub fn request_roll(&mut self, name: &str) {
        if self.catalog.is_none() {
            self.status = "no workbook loaded".to_string();
            return;
        }
        let karma_eligible = self
            .catalog
            .as_ref()
            .and_then(|catalog| catalog.get(name))
            .map(|talent| talent.karma);

        match karma_eligible {
            Some(true) => self.pending_karma = Some(name.to_string()),
            Some(false) => self.finish_roll(name, false),
            None => {
                self.result = ResultView {
                    heading: format!("Talent \"{name}\" not found in the workbook."),
                    total: String::new(),
                    details: String::new(),
                };
            }
        }
    }

    /// Persist the current workbook and karma die choice for next launch.
    ///
    /// Called on shutdown; a missing config directory is not an error.
    pub fn save_settings(&self) -> Result<(), tw_sheet::SheetError> {
        let Some(path) = Settings::default_path() else {
            return Ok(());
        };
        let mut settings = self.settings.clone();
        settings.karma_die = self.karma_die().to_string();
        settings.save(&path)
    }

    /// Complete a roll once the karma decision is known.
    pub fn finish_roll(&mut self, name: &str, with_karma: bool) {
        self.pending_karma = None;
        let Some(talent) = self
            .catalog
            .as_ref()
            .and_then(|catalog| catalog.get(name))
            .cloned()
        else {
            return;
        };

        let karma_die = if with_karma {
            KarmaDie::parse(self.karma_die()).ok()
        } else {
            None
        };
        let trace = talent.expression.roll_with_karma(karma_die, &mut self.rng);

        self.result = ResultView {
            heading: format!(
                "Result for \"{}\" (total level {}/{}):",
                talent.name, talent.total_level, talent.expression,
            ),
            total: trace.total.to_string(),
            details: trace.details(),
        };
        self.history.insert(
            0,
            HistoryEntry {
                label: talent.name,
                trace,
            },
        );
        self.history.truncate(HISTORY_LIMIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    fn test_catalog() -> TalentCatalog {
        let mut catalog = TalentCatalog::new();
        catalog.ingest_row("Stealth", Some(10.0), Some("3D6"), Some(2.0));
        catalog.ingest_row("Steel Thought (D)", Some(7.0), Some("2D8"), Some(1.0));
        catalog.ingest_row("Avoid Blow", Some(8.0), Some("D10+2"), Some(1.0));
        catalog
    }

    fn test_app() -> App {
        let mut app = App::new(Settings::default(), Some(42));
        let catalog = test_catalog();
        app.quick = catalog.ranked_names(4, 5).into_iter().collect();
        app.catalog = Some(catalog);
        app.refresh_hits();
        app
    }

    #[test]
    fn autocomplete_matches_prefix_case_insensitively() {
        let mut app = test_app();
        app.input = "ste".to_string();
        app.refresh_hits();
        assert_eq!(app.hits, vec!["Stealth", "Steel Thought (D)"]);

        app.cycle_hit();
        assert_eq!(app.input, "Stealth");
        app.cycle_hit();
        assert_eq!(app.input, "Steel Thought (D)");
        app.cycle_hit();
        assert_eq!(app.input, "Stealth");
    }

    #[test]
    fn hit_preview_shows_the_remainder() {
        let mut app = test_app();
        app.input = "Av".to_string();
        app.refresh_hits();
        assert_eq!(app.hit_preview(), Some("oid Blow".to_string()));
    }

    #[test]
    fn plain_talent_rolls_immediately() {
        let mut app = test_app();
        app.request_roll("Stealth");
        assert!(app.pending_karma.is_none());
        assert_eq!(app.history.len(), 1);
        assert!(app.result.heading.contains("Stealth"));
        assert!(!app.result.total.is_empty());
    }

    #[test]
    fn karma_talent_waits_for_the_prompt() {
        let mut app = test_app();
        app.request_roll("Steel Thought (D)");
        assert_eq!(app.pending_karma.as_deref(), Some("Steel Thought (D)"));
        assert!(app.history.is_empty());

        app.finish_roll("Steel Thought (D)", true);
        assert!(app.pending_karma.is_none());
        assert_eq!(app.history.len(), 1);
        assert!(app.result.details.contains("+karma (D8):"));
    }

    #[test]
    fn declining_karma_rolls_without_it() {
        let mut app = test_app();
        app.request_roll("Steel Thought (D)");
        app.finish_roll("Steel Thought (D)", false);
        assert_eq!(app.history.len(), 1);
        assert!(!app.result.details.contains("karma"));
    }

    #[test]
    fn unknown_talent_shows_a_message() {
        let mut app = test_app();
        app.request_roll("Juggling");
        assert!(app.result.heading.contains("not found"));
        assert!(app.result.total.is_empty());
        assert!(app.history.is_empty());
    }

    #[test]
    fn quick_cursor_walks_all_groups() {
        let mut app = test_app();
        // Rank 1: Avoid Blow, Steel Thought (D); rank 2: Stealth.
        assert_eq!(app.quick_len(), 3);
        assert_eq!(app.quick_selected(), Some("Avoid Blow"));
        app.quick_move(true);
        assert_eq!(app.quick_selected(), Some("Steel Thought (D)"));
        app.quick_move(true);
        assert_eq!(app.quick_selected(), Some("Stealth"));
        app.quick_move(true);
        assert_eq!(app.quick_selected(), Some("Avoid Blow"));
        app.quick_move(false);
        assert_eq!(app.quick_selected(), Some("Stealth"));
    }

    #[test]
    fn failed_reload_keeps_the_previous_catalog() {
        let mut app = test_app();
        app.settings.workbook = Some(PathBuf::from("/definitely/not/here.xlsx"));
        app.reload();
        assert!(app.status.contains("load failed"));
        assert!(app.catalog.is_some());
        assert_eq!(app.catalog.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn karma_die_selector_cycles() {
        let mut app = test_app();
        assert_eq!(app.karma_die(), "D8");
        app.next_karma_die();
        assert_eq!(app.karma_die(), "D10");
        app.next_karma_die();
        assert_eq!(app.karma_die(), "D12");
        app.next_karma_die();
        assert_eq!(app.karma_die(), "D8");
    }
}
