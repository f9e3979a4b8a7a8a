//! Record types for the five mirrored game-data tables.
//!
//! All records deserialize from the remote JSON documents with camelCase
//! field names; fields the mirror does not care about are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Dataset identity
// ---------------------------------------------------------------------------

/// One of the five independently fetched and indexed game-data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// Combat stages (`stages` sub-document).
    Stage,
    /// Zones grouping stages (`zones` sub-document).
    Zone,
    /// Time-limited activities (`zoneToActivity` + `basicInfo`).
    Activity,
    /// Playable characters (top-level id → record map).
    Character,
    /// Tower-mode instances (`towers` sub-document).
    Tower,
}

impl Dataset {
    /// All datasets, in the order `sync_all` refreshes them.
    pub const ALL: [Dataset; 5] = [
        Dataset::Stage,
        Dataset::Zone,
        Dataset::Activity,
        Dataset::Character,
        Dataset::Tower,
    ];

    /// Lowercase name used in logs and diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Stage => "stage",
            Dataset::Zone => "zone",
            Dataset::Activity => "activity",
            Dataset::Character => "character",
            Dataset::Tower => "tower",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A combat stage.
///
/// Indexed by its stage key and, when `level_id` is present, by the
/// lowercased level id as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Stage key. Filled from the enclosing map key when the record
    /// itself omits it.
    #[serde(default)]
    pub stage_id: String,
    /// Secondary identifier, ambiguous across reissued stage codes.
    #[serde(default)]
    pub level_id: Option<String>,
    /// Human-readable stage code (e.g. `"1-7"`), compared
    /// case-insensitively during lookup.
    #[serde(default)]
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Key of the zone this stage belongs to.
    #[serde(default)]
    pub zone_id: String,
}

/// A zone — a group of stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone key. Filled from the enclosing map key when absent.
    #[serde(default)]
    pub zone_id: String,
    /// First display name line (e.g. an episode number).
    #[serde(default)]
    pub zone_name_first: Option<String>,
    /// Second display name line (the zone's title).
    #[serde(default)]
    pub zone_name_second: Option<String>,
}

/// A time-limited activity, associated to zones via the zone→activity
/// mapping table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity key.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Start of the activity window (epoch seconds).
    #[serde(default)]
    pub start_time: Option<i64>,
    /// End of the activity window (epoch seconds).
    #[serde(default)]
    pub end_time: Option<i64>,
}

/// A playable character.
///
/// Raw ids have the form `<prefix>_<tier>_<shortId>`; only ids with
/// exactly three underscore-separated segments are characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Raw compound id. Filled from the enclosing map key.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Profession / class tag.
    #[serde(default)]
    pub profession: Option<String>,
    /// Rarity tier.
    #[serde(default)]
    pub rarity: Option<i32>,
}

impl Character {
    /// The trailing segment of the raw id, used as the index key.
    ///
    /// Returns `None` unless the id splits into exactly three
    /// underscore-separated segments.
    #[must_use]
    pub fn short_id(&self) -> Option<&str> {
        let segments: Vec<&str> = self.id.split('_').collect();
        if segments.len() == 3 {
            Some(segments[2])
        } else {
            None
        }
    }
}

/// A tower-mode instance, keyed by zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tower {
    /// Tower key. Filled from the enclosing map key when absent.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Subtitle shown under the name.
    #[serde(default)]
    pub sub_name: Option<String>,
}
