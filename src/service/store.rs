//! Identity → (template, seed) assignment stores.

use parking_lot::Mutex;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::core::record::fresh_seed;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonWrite(#[from] ron::Error),
    #[error("store has no templates to assign")]
    NoTemplates,
}

/// The stable document assignment of one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub template: u32,
    pub seed: u64,
}

impl Assignment {
    /// A uniformly random template in [1, total_templates] and a fresh seed.
    pub fn random(total_templates: u32) -> Result<Assignment, StoreError> {
        if total_templates == 0 {
            return Err(StoreError::NoTemplates);
        }
        Ok(Assignment {
            template: rand::thread_rng().gen_range(1..=total_templates),
            seed: fresh_seed(),
        })
    }
}

/// Supplies one stable assignment per identity, creating it on first sight.
pub trait AssignmentStore: Send + Sync {
    fn lookup_or_assign(&self, identity: &str) -> Result<Assignment, StoreError>;
}

/// Process-lifetime store with no persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    total_templates: u32,
    entries: Mutex<FxHashMap<String, Assignment>>,
}

impl MemoryStore {
    pub fn new(total_templates: u32) -> Self {
        Self {
            total_templates,
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl AssignmentStore for MemoryStore {
    fn lookup_or_assign(&self, identity: &str) -> Result<Assignment, StoreError> {
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(identity) {
            return Ok(*existing);
        }
        let assignment = Assignment::random(self.total_templates)?;
        info!(
            identity,
            template = assignment.template,
            seed = assignment.seed,
            "assigned template to new identity"
        );
        entries.insert(identity.to_string(), assignment);
        Ok(assignment)
    }
}

/// One persisted row. `seed` is optional because early rows were written
/// before seeds existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub identity: String,
    pub template: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Store persisted as a RON list of `AssignmentRecord`s, rewritten on every
/// change.
#[derive(Debug)]
pub struct RonFileStore {
    path: PathBuf,
    total_templates: u32,
    records: Mutex<Vec<AssignmentRecord>>,
}

impl RonFileStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>, total_templates: u32) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                ron::from_str(&contents)?
            }
        } else {
            Vec::new()
        };
        info!(path = %path.display(), records = records.len(), "opened assignment store");
        Ok(Self {
            path,
            total_templates,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> Vec<AssignmentRecord> {
        self.records.lock().clone()
    }

    fn persist(&self, records: &[AssignmentRecord]) -> Result<(), StoreError> {
        let text = ron::ser::to_string_pretty(records, ron::ser::PrettyConfig::default())?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

impl AssignmentStore for RonFileStore {
    /// Changes reach the in-memory rows only after they are on disk, so a
    /// failed write leaves the store as it was.
    fn lookup_or_assign(&self, identity: &str) -> Result<Assignment, StoreError> {
        let mut records = self.records.lock();

        if let Some(pos) = records.iter().position(|r| r.identity == identity) {
            let template = records[pos].template;
            if let Some(seed) = records[pos].seed.filter(|&seed| seed != 0) {
                return Ok(Assignment { template, seed });
            }
            let seed = fresh_seed();
            let mut staged = records.clone();
            staged[pos].seed = Some(seed);
            self.persist(&staged)?;
            *records = staged;
            info!(identity, seed, "backfilled missing seed");
            return Ok(Assignment { template, seed });
        }

        let assignment = Assignment::random(self.total_templates)?;
        let mut staged = records.clone();
        staged.push(AssignmentRecord {
            identity: identity.to_string(),
            template: assignment.template,
            seed: Some(assignment.seed),
        });
        self.persist(&staged)?;
        *records = staged;
        info!(
            identity,
            template = assignment.template,
            seed = assignment.seed,
            "assigned template to new identity"
        );
        Ok(assignment)
    }
}
