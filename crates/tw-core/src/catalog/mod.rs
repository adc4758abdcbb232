//! Talent catalog: a validated name lookup table built from sheet rows.
//!
//! Rows arrive from the spreadsheet loader in source order and are validated
//! once at this boundary; downstream code never re-checks cell types.
//! Conflicts are resolved on insertion: a karma-marked entry shadows its
//! plain variant, and a recurring display name is only replaced by a row
//! with a strictly higher total level.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::dice::DiceExpression;

/// Suffix marking a talent as karma-eligible, e.g. `Stealth (D)`.
pub const KARMA_MARKER: &str = " (D)";

/// A validated talent entry, immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talent {
    /// Display name as written in the sheet, marker included.
    pub name: String,
    /// Name with the karma marker stripped; the conflict-resolution key.
    pub base_name: String,
    /// The parsed dice formula; `Display` yields the normalized text.
    pub expression: DiceExpression,
    /// True iff the name carried the karma marker.
    pub karma: bool,
    /// Quick-access classification. Integral ranks 1-4 feed the shortcut
    /// panel; anything else stays on the talent but never enters it.
    pub rank: Option<i64>,
    /// Tie-breaker between rows sharing a display name.
    pub total_level: f64,
}

/// Name → talent mapping with the merge policy applied at insertion.
///
/// Rebuilt wholesale per workbook load: callers build a fresh catalog and
/// swap it in only once ingestion finishes, so a failed load never leaves a
/// half-filled catalog visible.
#[derive(Debug, Clone, Default)]
pub struct TalentCatalog {
    talents: HashMap<String, Talent>,
}

impl TalentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate one sheet row and insert it under the merge policy.
    ///
    /// Returns `false`, leaving the catalog untouched, when the row is
    /// malformed or superseded. The reason is emitted as a debug event
    /// only; per-row failures are developer diagnostics, not user-facing.
    pub fn ingest_row(
        &mut self,
        name: &str,
        total_level: Option<f64>,
        dice: Option<&str>,
        rank: Option<f64>,
    ) -> bool {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("row rejected: empty name");
            return false;
        }
        let Some(total_level) = total_level else {
            tracing::debug!(name, "row rejected: no numeric total level");
            return false;
        };
        let Some(dice) = dice.map(str::trim).filter(|d| !d.is_empty()) else {
            tracing::debug!(name, "row rejected: empty dice expression");
            return false;
        };
        let expression = match DiceExpression::parse(dice) {
            Ok(expression) => expression,
            Err(e) => {
                tracing::debug!(name, %e, "row rejected");
                return false;
            }
        };

        let (base_name, karma) = match name.strip_suffix(KARMA_MARKER) {
            Some(base) => (base, true),
            None => (name, false),
        };
        if base_name.trim().is_empty() {
            tracing::debug!(name, "row rejected: nothing left after the karma marker");
            return false;
        }

        // A karma-marked entry always shadows its plain variant, regardless
        // of level or insertion order.
        if !karma && self.talents.contains_key(&format!("{base_name}{KARMA_MARKER}")) {
            tracing::debug!(name, "row rejected: karma variant already present");
            return false;
        }

        if let Some(existing) = self.talents.get(name)
            && total_level <= existing.total_level
        {
            tracing::debug!(
                name,
                total_level,
                existing = existing.total_level,
                "row rejected: not above stored total level"
            );
            return false;
        }

        self.talents.insert(
            name.to_string(),
            Talent {
                name: name.to_string(),
                base_name: base_name.to_string(),
                expression,
                karma,
                rank: rank.filter(|r| r.fract() == 0.0).map(|r| r as i64),
                total_level,
            },
        );
        true
    }

    /// Exact-match lookup by display name.
    ///
    /// Fuzzy and prefix matching belong to the selection frontend, not here.
    pub fn get(&self, name: &str) -> Option<&Talent> {
        self.talents.get(name)
    }

    /// All display names in case-insensitive alphabetical order, stable for
    /// identical inputs.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.talents.keys().cloned().collect();
        names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        names
    }

    /// Quick-access grouping: talents whose rank lies in `1..=max_rank`,
    /// grouped by rank, each group name-sorted ascending and truncated to
    /// `per_rank` entries.
    ///
    /// Feeds the fixed shortcut buttons; not meant to be exhaustive.
    pub fn ranked_names(&self, max_rank: i64, per_rank: usize) -> BTreeMap<i64, Vec<String>> {
        let mut groups: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        for talent in self.talents.values() {
            if let Some(rank) = talent.rank
                && (1..=max_rank).contains(&rank)
            {
                groups.entry(rank).or_default().push(talent.name.clone());
            }
        }
        for names in groups.values_mut() {
            names.sort_by(|a, b| {
                a.to_lowercase()
                    .cmp(&b.to_lowercase())
                    .then_with(|| a.cmp(b))
            });
            names.truncate(per_rank);
        }
        groups
    }

    /// Number of stored talents.
    pub fn len(&self) -> usize {
        self.talents.len()
    }

    /// True if the catalog holds no talents.
    pub fn is_empty(&self) -> bool {
        self.talents.is_empty()
    }
}
