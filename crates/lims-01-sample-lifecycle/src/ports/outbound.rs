//! Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use shared_types::{Actor, ClientId, Placement, Record, SampleId, StorageError};

use crate::domain::client::Client;
use crate::domain::errors::{LifecycleResult, NotificationError};
use crate::domain::rerun::Rerun;
use crate::domain::sample::Sample;

/// Sample storage
///
/// Reads here see committed data only. Writes go through a [`UnitOfWork`].
pub trait SampleRepository: Send + Sync {
    /// Open a unit of work.
    ///
    /// Implementations serialize units of work against each other. Do not
    /// hold one across an `.await`.
    fn begin(&self) -> Box<dyn UnitOfWork + '_>;

    /// Committed sample by key.
    fn sample(&self, id: SampleId) -> Result<Option<Sample>, StorageError>;

    /// Committed audit history of a sample, oldest first.
    fn records(&self, id: SampleId) -> Result<Vec<Record>, StorageError>;

    /// Committed rerun by source.
    fn rerun_from(&self, source: SampleId) -> Result<Option<Rerun>, StorageError>;

    /// Committed rerun by retest.
    fn rerun_for(&self, retest: SampleId) -> Result<Option<Rerun>, StorageError>;

    /// Committed client by key.
    fn client(&self, id: ClientId) -> Result<Option<Client>, StorageError>;
}

/// Staged reads and writes over the sample store.
///
/// Reads see committed data plus this unit's own staged writes. Nothing is
/// visible to other readers until [`commit`](UnitOfWork::commit); dropping
/// the unit discards every staged write.
pub trait UnitOfWork {
    fn sample(&self, id: SampleId) -> Result<Option<Sample>, StorageError>;

    /// Sample with this `(identifier, is_retest)` pair.
    fn find_by_identifier(
        &self,
        identifier: &str,
        is_retest: bool,
    ) -> Result<Option<Sample>, StorageError>;

    fn rerun_from(&self, source: SampleId) -> Result<Option<Rerun>, StorageError>;

    fn client_by_name(&self, name: &str) -> Result<Option<Client>, StorageError>;

    /// Stage a new sample. `Conflict` if the key exists.
    fn insert_sample(&mut self, sample: Sample) -> Result<(), StorageError>;

    /// Stage an update. `NotFound` if the key is unknown.
    fn update_sample(&mut self, sample: Sample) -> Result<(), StorageError>;

    fn append_record(&mut self, record: Record) -> Result<(), StorageError>;

    fn insert_rerun(&mut self, rerun: Rerun) -> Result<(), StorageError>;

    fn insert_client(&mut self, client: Client) -> Result<(), StorageError>;

    /// Make every staged write visible at once.
    fn commit(self: Box<Self>) -> Result<(), StorageError>;
}

/// Identifier and credential source
pub trait IdentifierGenerator: Send + Sync {
    /// Random external identifier for a new sample.
    fn sample_identifier(&self) -> String;

    /// Random access credential for a new client.
    fn api_key(&self) -> String;
}

/// Plate/well layout check
pub trait WellPlacementValidator: Send + Sync {
    /// `WellConflict` if `sample` may not move to `placement`.
    fn validate_placement(&self, sample: &Sample, placement: &Placement) -> LifecycleResult<()>;
}

/// Outbound result and rejection delivery
///
/// Failures are logged by the caller and never undo a transition.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// The sample's result is ready for its client.
    async fn notify_result(&self, sample: &Sample, actor: &Actor) -> Result<(), NotificationError>;

    /// The sample was rejected.
    async fn notify_rejection(&self, sample: &Sample, actor: &Actor)
        -> Result<(), NotificationError>;
}
