//! Inbound Ports (Driving Ports / API)

use async_trait::async_trait;
use shared_types::{ClientId, Placement, Record, SampleId, SampleState};

use crate::domain::actor::ActorContext;
use crate::domain::client::Client;
use crate::domain::errors::LifecycleResult;
use crate::domain::rerun::Rerun;
use crate::domain::sample::{NewSample, Sample};

/// Primary Sample Lifecycle API
///
/// Write operations take the caller's [`ActorContext`]; the resolved actor
/// is attributed on every audit record they write.
#[async_trait]
pub trait SampleLifecycleApi: Send + Sync {
    /// Create a sample together with its creation record.
    ///
    /// The identifier is generated when `new` carries none.
    async fn create_sample(&self, new: NewSample, ctx: &ActorContext) -> LifecycleResult<Sample>;

    /// Move a sample to `target`.
    ///
    /// Requesting the current state is a no-op: no record, no event.
    async fn attempt_transition(
        &self,
        sample: SampleId,
        target: SampleState,
        ctx: &ActorContext,
    ) -> LifecycleResult<Sample>;

    /// Like [`attempt_transition`](Self::attempt_transition) with a note on
    /// the record.
    async fn transition_with_note(
        &self,
        sample: SampleId,
        target: SampleState,
        note: String,
        ctx: &ActorContext,
    ) -> LifecycleResult<Sample>;

    /// Fork a retest owned by the same client. Returns the new sample.
    async fn create_retest(
        &self,
        source: SampleId,
        reason: &str,
        ctx: &ActorContext,
    ) -> LifecycleResult<Sample>;

    /// Fork a retest of a settled sample, owned by the internal rerun client.
    async fn create_posthoc_retest(
        &self,
        source: SampleId,
        reason: &str,
        ctx: &ActorContext,
    ) -> LifecycleResult<Sample>;

    /// Assign a plate and well. Writes no audit record.
    fn place_in_well(&self, sample: SampleId, placement: Placement) -> LifecycleResult<Sample>;

    /// Register a client with a generated api key.
    fn create_client(&self, name: &str, notify: bool) -> LifecycleResult<Client>;

    /// Committed sample by key.
    fn sample(&self, id: SampleId) -> LifecycleResult<Sample>;

    /// Audit history of a sample, oldest first.
    fn records(&self, id: SampleId) -> LifecycleResult<Vec<Record>>;

    /// Rerun whose source is `source`.
    fn rerun_from(&self, source: SampleId) -> LifecycleResult<Option<Rerun>>;

    /// Rerun whose retest is `retest`.
    fn rerun_for(&self, retest: SampleId) -> LifecycleResult<Option<Rerun>>;

    /// Source sample of a retest.
    fn source_of(&self, retest: SampleId) -> LifecycleResult<Option<Sample>>;

    /// Retest forked from a source.
    fn retest_of(&self, source: SampleId) -> LifecycleResult<Option<Sample>>;

    /// Client by key.
    fn client(&self, id: ClientId) -> LifecycleResult<Option<Client>>;
}
