//! The game data mirror — sync engine and lookup API.
//!
//! One [`GameDataMirror`] per process holds the published snapshot of
//! each dataset. Refreshes build the next snapshot off to the side and
//! publish it with a single atomic store; readers load whichever
//! snapshot is current and never block on a refresh in progress.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::MirrorConfig;
use crate::error::{Result, SyncError};
use crate::fetch::DatasetFetcher;
use crate::index::{
    KeyedIndex, StageIndex, build_activity_index, build_character_index, build_tower_index,
    build_zone_index,
};
use crate::types::{Activity, Character, Dataset, Stage, Tower, Zone};

// ---------------------------------------------------------------------------
// Sync reporting
// ---------------------------------------------------------------------------

/// Outcome of one dataset's refresh within a sync pass.
#[derive(Debug)]
pub struct DatasetOutcome {
    /// Which dataset was refreshed.
    pub dataset: Dataset,
    /// Entry count on success, the refresh error otherwise.
    pub result: Result<usize>,
}

/// Typed result of a [`GameDataMirror::sync_all`] pass.
///
/// Carries one outcome per dataset so a scheduler or health check can
/// react to individual failures without parsing log output.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Per-dataset outcomes in refresh order. Empty when `skipped`.
    pub outcomes: Vec<DatasetOutcome>,
    /// True when the pass was skipped because another was in flight.
    pub skipped: bool,
    /// When the pass started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the pass finished.
    pub finished_at: Option<DateTime<Utc>>,
}

impl SyncReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    /// Whether every dataset refreshed successfully.
    #[must_use]
    pub fn all_ok(&self) -> bool {
        !self.skipped && self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// The outcomes that failed.
    #[must_use]
    pub fn failures(&self) -> Vec<&DatasetOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err()).collect()
    }
}

/// Entry count and staleness of one published snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DatasetStats {
    /// Which dataset.
    pub dataset: Dataset,
    /// Records in the published snapshot.
    pub entries: usize,
    /// When the snapshot was published, `None` if never synced.
    pub refreshed_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// The mirror
// ---------------------------------------------------------------------------

/// Process-scoped mirror of the five remote game-data tables.
///
/// All snapshots start empty; the first [`sync_all`](Self::sync_all)
/// seeds them and every later sync wholesale-replaces them. A refresh
/// failure leaves the affected dataset's last-good snapshot in place.
pub struct GameDataMirror {
    fetcher: Arc<dyn DatasetFetcher>,
    config: MirrorConfig,
    stages: ArcSwap<StageIndex>,
    zones: ArcSwap<KeyedIndex<Zone>>,
    activities: ArcSwap<KeyedIndex<Activity>>,
    characters: ArcSwap<KeyedIndex<Character>>,
    towers: ArcSwap<KeyedIndex<Tower>>,
    // tokio's Mutex: the guard is held across fetch awaits.
    sync_guard: tokio::sync::Mutex<()>,
}

impl GameDataMirror {
    /// Create a mirror with empty snapshots.
    #[must_use]
    pub fn new(fetcher: Arc<dyn DatasetFetcher>, config: MirrorConfig) -> Self {
        Self {
            fetcher,
            config,
            stages: ArcSwap::from_pointee(StageIndex::default()),
            zones: ArcSwap::from_pointee(KeyedIndex::default()),
            activities: ArcSwap::from_pointee(KeyedIndex::default()),
            characters: ArcSwap::from_pointee(KeyedIndex::default()),
            towers: ArcSwap::from_pointee(KeyedIndex::default()),
            sync_guard: tokio::sync::Mutex::new(()),
        }
    }

    // -----------------------------------------------------------------------
    // Sync
    // -----------------------------------------------------------------------

    /// Refresh all five datasets in sequence.
    ///
    /// Each dataset's refresh is independently fallible and does not
    /// abort the others. Returns a [`SyncReport`] with one outcome per
    /// dataset. If another `sync_all` is already running, returns
    /// immediately with a skipped report instead of racing it.
    pub async fn sync_all(&self) -> SyncReport {
        let Ok(_guard) = self.sync_guard.try_lock() else {
            debug!("sync already in progress, skipping");
            return SyncReport::skipped();
        };

        let started_at = Some(Utc::now());
        let mut outcomes = Vec::with_capacity(Dataset::ALL.len());

        for dataset in Dataset::ALL {
            let result = match dataset {
                Dataset::Stage => self.sync_stages().await,
                Dataset::Zone => self.sync_zones().await,
                Dataset::Activity => self.sync_activities().await,
                Dataset::Character => self.sync_characters().await,
                Dataset::Tower => self.sync_towers().await,
            };
            if let Err(err) = &result {
                error!("{err}");
            }
            outcomes.push(DatasetOutcome { dataset, result });
        }

        SyncReport {
            outcomes,
            skipped: false,
            started_at,
            finished_at: Some(Utc::now()),
        }
    }

    /// Refresh the stage dataset, rebuilding the stage and level maps as
    /// a pair.
    ///
    /// # Errors
    /// Returns a [`SyncError`] on fetch or parse failure; the published
    /// snapshot is left untouched.
    pub async fn sync_stages(&self) -> Result<usize> {
        let mut doc = self.fetch_document(Dataset::Stage).await?;
        let entries: HashMap<String, Stage> = take_section(&mut doc, Dataset::Stage, "stages")?;

        let index = StageIndex::build(entries);
        let count = index.len();
        self.stages.store(Arc::new(index));

        info!("stage data refreshed, {} entries", count);
        Ok(count)
    }

    /// Refresh the zone dataset.
    ///
    /// # Errors
    /// Returns a [`SyncError`] on fetch or parse failure; the published
    /// snapshot is left untouched.
    pub async fn sync_zones(&self) -> Result<usize> {
        let mut doc = self.fetch_document(Dataset::Zone).await?;
        let entries: HashMap<String, Zone> = take_section(&mut doc, Dataset::Zone, "zones")?;

        let index = build_zone_index(entries);
        let count = index.len();
        self.zones.store(Arc::new(index));

        info!("zone data refreshed, {} entries", count);
        Ok(count)
    }

    /// Refresh the activity dataset by joining the zone→activity mapping
    /// against the activity basic-info table.
    ///
    /// # Errors
    /// Returns a [`SyncError`] on fetch or parse failure, or when either
    /// sub-document is missing; the published snapshot is left untouched.
    pub async fn sync_activities(&self) -> Result<usize> {
        let mut doc = self.fetch_document(Dataset::Activity).await?;
        let zone_to_activity: HashMap<String, String> =
            take_section(&mut doc, Dataset::Activity, "zoneToActivity")?;
        let basic_info: HashMap<String, Activity> =
            take_section(&mut doc, Dataset::Activity, "basicInfo")?;

        let index = build_activity_index(zone_to_activity, basic_info);
        let count = index.len();
        self.activities.store(Arc::new(index));

        info!("activity data refreshed, {} entries", count);
        Ok(count)
    }

    /// Refresh the character dataset. The document is a top-level
    /// id → record map; only three-segment ids are indexed.
    ///
    /// # Errors
    /// Returns a [`SyncError`] on fetch or parse failure; the published
    /// snapshot is left untouched.
    pub async fn sync_characters(&self) -> Result<usize> {
        let doc = self.fetch_document(Dataset::Character).await?;
        let entries: HashMap<String, Character> = serde_json::from_value(doc)
            .map_err(|source| SyncError::Parse {
                dataset: Dataset::Character,
                source,
            })?;

        let index = build_character_index(entries);
        let count = index.len();
        self.characters.store(Arc::new(index));

        info!("character data refreshed, {} entries", count);
        Ok(count)
    }

    /// Refresh the tower dataset.
    ///
    /// # Errors
    /// Returns a [`SyncError`] on fetch or parse failure; the published
    /// snapshot is left untouched.
    pub async fn sync_towers(&self) -> Result<usize> {
        let mut doc = self.fetch_document(Dataset::Tower).await?;
        let entries: HashMap<String, Tower> = take_section(&mut doc, Dataset::Tower, "towers")?;

        let index = build_tower_index(entries);
        let count = index.len();
        self.towers.store(Arc::new(index));

        info!("tower data refreshed, {} entries", count);
        Ok(count)
    }

    async fn fetch_document(&self, dataset: Dataset) -> Result<Value> {
        let url = self.config.endpoint(dataset);
        let body = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|source| SyncError::Fetch { dataset, source })?;
        serde_json::from_str(&body).map_err(|source| SyncError::Parse { dataset, source })
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Find a stage by level id and code, falling back to stage key.
    ///
    /// The level lookup is case-insensitive and only trusted when the
    /// stored code matches `code` case-insensitively — level ids are
    /// ambiguous across reissued stage codes, so the code disambiguates
    /// and the stage-key lookup is the authoritative fallback.
    #[must_use]
    pub fn find_stage(&self, level_id: &str, code: &str, stage_id: &str) -> Option<Stage> {
        let stages = self.stages.load();
        if let Some(stage) = stages.get_by_level(level_id) {
            if stage.code.eq_ignore_ascii_case(code) {
                return Some(stage.clone());
            }
        }
        stages.get(stage_id).cloned()
    }

    /// Find the zone owning the stage resolved by the
    /// [`find_stage`](Self::find_stage) rule.
    ///
    /// Returns `None` (and logs the offending key) when either the stage
    /// or its zone cannot be resolved.
    #[must_use]
    pub fn find_zone(&self, level_id: &str, code: &str, stage_id: &str) -> Option<Zone> {
        let Some(stage) = self.find_stage(level_id, code, stage_id) else {
            error!("stage not found: {} (level {})", stage_id, level_id);
            return None;
        };
        let zone = self.zones.load().get(&stage.zone_id).cloned();
        if zone.is_none() {
            error!("zone not found: {} (level {})", stage.zone_id, level_id);
        }
        zone
    }

    /// Find a tower by zone key.
    #[must_use]
    pub fn find_tower(&self, zone_id: &str) -> Option<Tower> {
        self.towers.load().get(zone_id).cloned()
    }

    /// Find a character by raw id.
    ///
    /// Splits on `_` and probes the trailing segment whatever the
    /// segment count; only the index build enforces the three-segment
    /// character id shape, so bare short ids resolve too.
    #[must_use]
    pub fn find_character(&self, character_id: &str) -> Option<Character> {
        let short_id = character_id.rsplit('_').next().unwrap_or(character_id);
        self.characters.load().get(short_id).cloned()
    }

    /// Find the activity associated with a zone key.
    #[must_use]
    pub fn find_activity_by_zone_id(&self, zone_id: &str) -> Option<Activity> {
        self.activities.load().get(zone_id).cloned()
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Entry count and staleness of every published snapshot, for health
    /// checks and scheduling decisions.
    #[must_use]
    pub fn stats(&self) -> Vec<DatasetStats> {
        Dataset::ALL
            .iter()
            .map(|&dataset| {
                let (entries, refreshed_at) = match dataset {
                    Dataset::Stage => {
                        let s = self.stages.load();
                        (s.len(), s.refreshed_at())
                    }
                    Dataset::Zone => {
                        let s = self.zones.load();
                        (s.len(), s.refreshed_at())
                    }
                    Dataset::Activity => {
                        let s = self.activities.load();
                        (s.len(), s.refreshed_at())
                    }
                    Dataset::Character => {
                        let s = self.characters.load();
                        (s.len(), s.refreshed_at())
                    }
                    Dataset::Tower => {
                        let s = self.towers.load();
                        (s.len(), s.refreshed_at())
                    }
                };
                DatasetStats {
                    dataset,
                    entries,
                    refreshed_at,
                }
            })
            .collect()
    }
}

/// Remove and deserialize a named sub-document from a parsed table.
fn take_section<T: serde::de::DeserializeOwned>(
    doc: &mut Value,
    dataset: Dataset,
    section: &'static str,
) -> Result<T> {
    let node = doc
        .get_mut(section)
        .map(Value::take)
        .ok_or(SyncError::MissingSection { dataset, section })?;
    serde_json::from_value(node).map_err(|source| SyncError::Parse { dataset, source })
}
