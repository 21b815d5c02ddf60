//! Caller-owned matcher context: the loaded table, where it came from, and
//! the live tunables.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use normmatch_core::config::NormMatchConfig;
use normmatch_core::errors::{FormatError, MatchError, NormMatchResult};
use normmatch_core::types::{ClassId, Feature};

use crate::loader::{load_table, BlockScanPolicy};
use crate::scorer::{self, MatchBreakdown};
use crate::table::PrototypeTable;
use crate::tunables::Tunables;

/// Normalization matcher with an explicit table lifecycle.
///
/// The table is swapped only through `&mut self` (`load`, `reload`,
/// `unload`), so no scoring call can observe a half-replaced table. Hosts
/// that score in parallel take an `Arc` snapshot with [`NormMatcher::table`].
#[derive(Debug, Default)]
pub struct NormMatcher {
    table: Option<Arc<PrototypeTable>>,
    source: Option<PathBuf>,
    policy: BlockScanPolicy,
    tunables: Arc<Tunables>,
}

impl NormMatcher {
    /// Matcher with no table loaded.
    pub fn new(tunables: Tunables) -> Self {
        Self {
            tunables: Arc::new(tunables),
            ..Self::default()
        }
    }

    /// Matcher over an already built table. `reload` is unavailable.
    pub fn with_table(table: PrototypeTable, tunables: Tunables) -> Self {
        Self {
            table: Some(Arc::new(table)),
            tunables: Arc::new(tunables),
            ..Self::default()
        }
    }

    /// Build tunables from `config` and load its prototype file.
    pub fn from_config(config: &NormMatchConfig) -> NormMatchResult<Self> {
        let tunables = Tunables::from_config(&config.matcher)?;
        let mut matcher = Self::new(tunables)
            .with_policy(BlockScanPolicy::from_strict(config.matcher.effective_strict_block_scan()));
        matcher.load(config.matcher.effective_proto_file())?;
        Ok(matcher)
    }

    pub fn with_policy(mut self, policy: BlockScanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load the table at `path`, replacing the current one only on success.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), FormatError> {
        let path = path.as_ref();
        let table = load_table(path, self.policy)?;
        self.table = Some(Arc::new(table));
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Re-read the table from the path it was last loaded from.
    pub fn reload(&mut self) -> NormMatchResult<()> {
        let path = self.source.clone().ok_or(MatchError::NotLoaded)?;
        tracing::info!(path = %path.display(), "Reloading prototype table");
        self.load(path)?;
        Ok(())
    }

    /// Drop this matcher's reference to the table. The table itself is
    /// released once outstanding snapshots are dropped.
    pub fn unload(&mut self) {
        if self.table.take().is_some() {
            tracing::info!("Unloaded prototype table");
        }
        self.source = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Shared snapshot of the current table.
    pub fn table(&self) -> Option<Arc<PrototypeTable>> {
        self.table.clone()
    }

    /// Shared handle for changing the tunables at runtime.
    pub fn tunables(&self) -> &Arc<Tunables> {
        &self.tunables
    }

    /// Rate `feature` against the class with raw id `class_id`.
    ///
    /// Ids above 255 are rejected with a bounds error. The noise class is
    /// scored without consulting the table and works before any load.
    pub fn compute_match(&self, class_id: u32, feature: &Feature, debug: bool) -> Result<f64, MatchError> {
        self.compute_match_id(ClassId::try_from(class_id)?, feature, debug)
    }

    /// Rate `feature` against the class named by `ch`.
    pub fn compute_match_char(&self, ch: char, feature: &Feature, debug: bool) -> Result<f64, MatchError> {
        self.compute_match_id(ClassId::from_char(ch)?, feature, debug)
    }

    pub fn compute_match_id(&self, class_id: ClassId, feature: &Feature, debug: bool) -> Result<f64, MatchError> {
        match &self.table {
            Some(table) => scorer::compute_match(table, &self.tunables, class_id, feature, debug),
            None if class_id.is_noise() => scorer::noise_rating(&self.tunables, feature),
            None => Err(MatchError::NotLoaded),
        }
    }

    /// Per-prototype breakdown of a match. Like [`NormMatcher::compute_match`],
    /// the noise class needs no table.
    pub fn explain_match(&self, class_id: u32, feature: &Feature) -> Result<MatchBreakdown, MatchError> {
        let class_id = ClassId::try_from(class_id)?;
        match &self.table {
            Some(table) => scorer::explain_match(table, &self.tunables, class_id, feature),
            None if class_id.is_noise() => scorer::explain_noise(&self.tunables, feature),
            None => Err(MatchError::NotLoaded),
        }
    }
}
