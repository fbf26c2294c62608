//! In-Memory Sample Store
//!
//! Implements `SampleRepository` for the lifecycle and `AuditTrailReader`
//! for reporting, over one lock-protected state.
//!
//! A unit of work holds the lock in upgradable mode: readers keep going,
//! but a second unit of work waits until the first commits or drops. The
//! commit upgrades to a write lock and applies the staged writes in one go.

use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use shared_types::{
    AuditEntry, AuditTrailReader, ClientId, Record, SampleId, SampleSummary, StorageError,
};
use std::collections::HashMap;
use tracing::debug;

use crate::domain::client::Client;
use crate::domain::rerun::Rerun;
use crate::domain::sample::Sample;
use crate::ports::outbound::{SampleRepository, UnitOfWork};

#[derive(Debug, Default)]
struct StoreState {
    samples: HashMap<SampleId, Sample>,
    /// Per-sample history, append order.
    records: HashMap<SampleId, Vec<Record>>,
    /// Keyed by source sample.
    reruns: HashMap<SampleId, Rerun>,
    clients: HashMap<ClientId, Client>,
}

/// In-memory sample storage for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemorySampleStore {
    state: RwLock<StoreState>,
}

impl InMemorySampleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every committed sample.
    pub fn all_samples(&self) -> Vec<Sample> {
        self.state.read().samples.values().cloned().collect()
    }

    /// Every committed rerun.
    pub fn all_reruns(&self) -> Vec<Rerun> {
        self.state.read().reruns.values().cloned().collect()
    }

    /// Every committed client.
    pub fn all_clients(&self) -> Vec<Client> {
        self.state.read().clients.values().cloned().collect()
    }

    /// Number of committed samples.
    pub fn sample_count(&self) -> usize {
        self.state.read().samples.len()
    }

    /// Number of committed records across all samples.
    pub fn record_count(&self) -> usize {
        self.state.read().records.values().map(Vec::len).sum()
    }
}

impl SampleRepository for InMemorySampleStore {
    fn begin(&self) -> Box<dyn UnitOfWork + '_> {
        Box::new(InMemoryUnitOfWork {
            committed: self.state.upgradable_read(),
            staged: StagedWrites::default(),
        })
    }

    fn sample(&self, id: SampleId) -> Result<Option<Sample>, StorageError> {
        Ok(self.state.read().samples.get(&id).cloned())
    }

    fn records(&self, id: SampleId) -> Result<Vec<Record>, StorageError> {
        Ok(self
            .state
            .read()
            .records
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    fn rerun_from(&self, source: SampleId) -> Result<Option<Rerun>, StorageError> {
        Ok(self.state.read().reruns.get(&source).cloned())
    }

    fn rerun_for(&self, retest: SampleId) -> Result<Option<Rerun>, StorageError> {
        Ok(self
            .state
            .read()
            .reruns
            .values()
            .find(|r| r.retest == retest)
            .cloned())
    }

    fn client(&self, id: ClientId) -> Result<Option<Client>, StorageError> {
        Ok(self.state.read().clients.get(&id).cloned())
    }
}

impl AuditTrailReader for InMemorySampleStore {
    fn audit_entries_for_client(&self, client: ClientId) -> Result<Vec<AuditEntry>, StorageError> {
        let state = self.state.read();

        let entries = state
            .samples
            .values()
            .filter(|s| s.client == client)
            .flat_map(|s| {
                state
                    .records
                    .get(&s.id)
                    .into_iter()
                    .flatten()
                    .map(move |r| AuditEntry {
                        sample: s.id,
                        client: s.client,
                        control: s.control,
                        state: r.state,
                        note: r.note.clone(),
                        recorded_at: r.recorded_at,
                    })
            })
            .collect();

        Ok(entries)
    }

    fn sample_summaries_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SampleSummary>, StorageError> {
        Ok(self
            .state
            .read()
            .samples
            .values()
            .filter(|s| s.created_at >= since)
            .map(summary)
            .collect())
    }

    fn sample_summaries(&self) -> Result<Vec<SampleSummary>, StorageError> {
        Ok(self.state.read().samples.values().map(summary).collect())
    }
}

fn summary(sample: &Sample) -> SampleSummary {
    SampleSummary {
        id: sample.id,
        state: sample.state,
        created_at: sample.created_at,
    }
}

#[derive(Debug, Default)]
struct StagedWrites {
    samples: HashMap<SampleId, Sample>,
    records: Vec<Record>,
    reruns: Vec<Rerun>,
    clients: Vec<Client>,
}

struct InMemoryUnitOfWork<'a> {
    committed: RwLockUpgradableReadGuard<'a, StoreState>,
    staged: StagedWrites,
}

impl InMemoryUnitOfWork<'_> {
    fn sample_exists(&self, id: &SampleId) -> bool {
        self.staged.samples.contains_key(id) || self.committed.samples.contains_key(id)
    }
}

impl UnitOfWork for InMemoryUnitOfWork<'_> {
    fn sample(&self, id: SampleId) -> Result<Option<Sample>, StorageError> {
        Ok(self
            .staged
            .samples
            .get(&id)
            .or_else(|| self.committed.samples.get(&id))
            .cloned())
    }

    fn find_by_identifier(
        &self,
        identifier: &str,
        is_retest: bool,
    ) -> Result<Option<Sample>, StorageError> {
        let matches = |s: &&Sample| s.identifier == identifier && s.is_retest == is_retest;

        let staged = self.staged.samples.values().find(matches);
        let committed = || {
            self.committed
                .samples
                .values()
                .filter(|s| !self.staged.samples.contains_key(&s.id))
                .find(matches)
        };

        Ok(staged.or_else(committed).cloned())
    }

    fn rerun_from(&self, source: SampleId) -> Result<Option<Rerun>, StorageError> {
        Ok(self
            .staged
            .reruns
            .iter()
            .find(|r| r.source == source)
            .or_else(|| self.committed.reruns.get(&source))
            .cloned())
    }

    fn client_by_name(&self, name: &str) -> Result<Option<Client>, StorageError> {
        Ok(self
            .staged
            .clients
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.committed.clients.values().find(|c| c.name == name))
            .cloned())
    }

    fn insert_sample(&mut self, sample: Sample) -> Result<(), StorageError> {
        if self.sample_exists(&sample.id) {
            return Err(StorageError::Conflict(format!("sample {}", sample.id)));
        }
        self.staged.samples.insert(sample.id, sample);
        Ok(())
    }

    fn update_sample(&mut self, sample: Sample) -> Result<(), StorageError> {
        if !self.sample_exists(&sample.id) {
            return Err(StorageError::NotFound(format!("sample {}", sample.id)));
        }
        self.staged.samples.insert(sample.id, sample);
        Ok(())
    }

    fn append_record(&mut self, record: Record) -> Result<(), StorageError> {
        if !self.sample_exists(&record.sample) {
            return Err(StorageError::NotFound(format!("sample {}", record.sample)));
        }
        self.staged.records.push(record);
        Ok(())
    }

    fn insert_rerun(&mut self, rerun: Rerun) -> Result<(), StorageError> {
        if self.rerun_from(rerun.source)?.is_some() {
            return Err(StorageError::Conflict(format!(
                "rerun for sample {}",
                rerun.source
            )));
        }
        self.staged.reruns.push(rerun);
        Ok(())
    }

    fn insert_client(&mut self, client: Client) -> Result<(), StorageError> {
        let exists = self.committed.clients.contains_key(&client.id)
            || self.staged.clients.iter().any(|c| c.id == client.id);
        if exists {
            return Err(StorageError::Conflict(format!("client {}", client.id)));
        }
        self.staged.clients.push(client);
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let InMemoryUnitOfWork { committed, staged } = *self;
        let mut state = RwLockUpgradableReadGuard::upgrade(committed);

        debug!(
            samples = staged.samples.len(),
            records = staged.records.len(),
            reruns = staged.reruns.len(),
            clients = staged.clients.len(),
            "Committing unit of work"
        );

        state.samples.extend(staged.samples);
        for record in staged.records {
            state.records.entry(record.sample).or_default().push(record);
        }
        for rerun in staged.reruns {
            state.reruns.insert(rerun.source, rerun);
        }
        for client in staged.clients {
            state.clients.insert(client.id, client);
        }

        Ok(())
    }
}
