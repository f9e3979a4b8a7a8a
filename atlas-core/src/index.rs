//! Snapshot index structures and builders.
//!
//! Each dataset is published as one immutable snapshot built here from
//! the parsed table. Builders take ownership of unshared scratch maps and
//! derive every secondary index before the snapshot becomes visible, so a
//! published snapshot is always internally consistent.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::{Activity, Character, Stage, Tower, Zone};

// ---------------------------------------------------------------------------
// Stage index — the only paired snapshot
// ---------------------------------------------------------------------------

/// Stage lookup snapshot.
///
/// Holds two maps rebuilt together: by stage key, and by lowercased level
/// id. Stages without a level id are absent from the level map.
#[derive(Debug, Clone, Default)]
pub struct StageIndex {
    by_stage_id: HashMap<String, Stage>,
    by_level_id: HashMap<String, Stage>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl StageIndex {
    /// Build a stage index from a parsed `stages` table.
    ///
    /// The enclosing map key becomes the record's `stage_id` when the
    /// record omits its own.
    #[must_use]
    pub fn build(entries: HashMap<String, Stage>) -> Self {
        let mut by_stage_id = HashMap::with_capacity(entries.len());
        let mut by_level_id = HashMap::with_capacity(entries.len());

        for (key, mut stage) in entries {
            if stage.stage_id.is_empty() {
                stage.stage_id = key.clone();
            }
            if let Some(level_id) = &stage.level_id {
                if !level_id.is_empty() {
                    by_level_id.insert(level_id.to_lowercase(), stage.clone());
                }
            }
            by_stage_id.insert(key, stage);
        }

        Self {
            by_stage_id,
            by_level_id,
            refreshed_at: Some(Utc::now()),
        }
    }

    /// Look up a stage by its stage key.
    #[must_use]
    pub fn get(&self, stage_id: &str) -> Option<&Stage> {
        self.by_stage_id.get(stage_id)
    }

    /// Look up a stage by level id, case-insensitively.
    #[must_use]
    pub fn get_by_level(&self, level_id: &str) -> Option<&Stage> {
        self.by_level_id.get(&level_id.to_lowercase())
    }

    /// Number of stages in the primary map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_stage_id.len()
    }

    /// Whether the index holds no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_stage_id.is_empty()
    }

    /// When this snapshot was built, `None` if never synced.
    #[must_use]
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }
}

// ---------------------------------------------------------------------------
// Single-map snapshots
// ---------------------------------------------------------------------------

/// A single-map lookup snapshot for one dataset.
#[derive(Debug, Clone)]
pub struct KeyedIndex<T> {
    entries: HashMap<String, T>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl<T> Default for KeyedIndex<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            refreshed_at: None,
        }
    }
}

impl<T> KeyedIndex<T> {
    /// Wrap a freshly built map into a snapshot stamped now.
    #[must_use]
    pub fn new(entries: HashMap<String, T>) -> Self {
        Self {
            entries,
            refreshed_at: Some(Utc::now()),
        }
    }

    /// Look up a record by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When this snapshot was built, `None` if never synced.
    #[must_use]
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build the zone snapshot, injecting the map key as `zone_id` where the
/// record omits it.
#[must_use]
pub fn build_zone_index(entries: HashMap<String, Zone>) -> KeyedIndex<Zone> {
    let zones = entries
        .into_iter()
        .map(|(key, mut zone)| {
            if zone.zone_id.is_empty() {
                zone.zone_id = key.clone();
            }
            (key, zone)
        })
        .collect();
    KeyedIndex::new(zones)
}

/// Build the tower snapshot, keyed by zone key.
#[must_use]
pub fn build_tower_index(entries: HashMap<String, Tower>) -> KeyedIndex<Tower> {
    let towers = entries
        .into_iter()
        .map(|(key, mut tower)| {
            if tower.id.is_empty() {
                tower.id = key.clone();
            }
            (key, tower)
        })
        .collect();
    KeyedIndex::new(towers)
}

/// Build the character snapshot, keyed by the trailing id segment.
///
/// Entries whose raw id does not split into exactly three
/// underscore-separated segments are not characters and are dropped.
#[must_use]
pub fn build_character_index(entries: HashMap<String, Character>) -> KeyedIndex<Character> {
    let mut characters = HashMap::new();
    for (key, mut character) in entries {
        if character.id.is_empty() {
            character.id = key;
        }
        if let Some(short_id) = character.short_id() {
            characters.insert(short_id.to_string(), character);
        }
    }
    KeyedIndex::new(characters)
}

/// Build the activity snapshot by joining the zone→activity table against
/// the activity basic-info table.
///
/// Zones whose target activity id has no basic-info entry are omitted and
/// logged.
#[must_use]
pub fn build_activity_index(
    zone_to_activity: HashMap<String, String>,
    basic_info: HashMap<String, Activity>,
) -> KeyedIndex<Activity> {
    let mut activities = HashMap::with_capacity(zone_to_activity.len());
    for (zone_id, activity_id) in zone_to_activity {
        match basic_info.get(&activity_id) {
            Some(activity) => {
                let mut activity = activity.clone();
                if activity.id.is_empty() {
                    activity.id = activity_id;
                }
                activities.insert(zone_id, activity);
            }
            None => {
                tracing::warn!(
                    "activity {} referenced by zone {} has no basic info, skipping",
                    activity_id,
                    zone_id
                );
            }
        }
    }
    KeyedIndex::new(activities)
}
