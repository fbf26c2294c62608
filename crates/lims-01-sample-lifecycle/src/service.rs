//! Sample Lifecycle Service
//!
//! Main service implementing `SampleLifecycleApi`.
//!
//! Every write follows the same shape:
//! 1. Open a unit of work
//! 2. Load and validate
//! 3. Stage sample, record, rerun and client writes
//! 4. Commit
//! 5. Publish events on the bus
//!
//! Steps 1-4 are synchronous and the unit of work never lives across an
//! `.await`. Publication failures cannot reach the committed data.

use async_trait::async_trait;
use shared_bus::{EventPublisher, LifecycleEvent};
use shared_types::{Actor, ClientId, Clock, Placement, Record, SampleId, SampleState};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::algorithms::{apply_transition, check_retest_preconditions, creation_record, retest_attributes};
use crate::config::LifecycleConfig;
use crate::domain::actor::ActorContext;
use crate::domain::client::Client;
use crate::domain::errors::{LifecycleError, LifecycleResult};
use crate::domain::rerun::{Rerun, RetestKind};
use crate::domain::sample::{NewSample, Sample};
use crate::domain::transitions::allowed_targets;
use crate::ports::inbound::SampleLifecycleApi;
use crate::ports::outbound::{
    IdentifierGenerator, SampleRepository, UnitOfWork, WellPlacementValidator,
};

/// Committed result of a write plus the events to publish for it.
type Committed<T> = (T, Vec<LifecycleEvent>);

/// Sample Lifecycle Service
pub struct SampleLifecycleService {
    repository: Arc<dyn SampleRepository>,
    identifiers: Arc<dyn IdentifierGenerator>,
    placement: Arc<dyn WellPlacementValidator>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    config: LifecycleConfig,
}

impl SampleLifecycleService {
    /// Create a new service.
    pub fn new(
        repository: Arc<dyn SampleRepository>,
        identifiers: Arc<dyn IdentifierGenerator>,
        placement: Arc<dyn WellPlacementValidator>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            repository,
            identifiers,
            placement,
            publisher,
            clock,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    async fn publish_all(&self, events: Vec<LifecycleEvent>) {
        for event in events {
            self.publisher.publish(event).await;
        }
    }

    // =========================================================================
    // STAGING HELPERS (run inside an open unit of work)
    // =========================================================================

    fn stage_new_sample(
        &self,
        uow: &mut dyn UnitOfWork,
        mut new: NewSample,
        actor: &Actor,
    ) -> LifecycleResult<Sample> {
        let identifier = match new.identifier.take() {
            Some(identifier) => identifier,
            None => self.identifiers.sample_identifier(),
        };

        if uow.find_by_identifier(&identifier, new.is_retest)?.is_some() {
            return Err(LifecycleError::DuplicateIdentifier {
                identifier,
                is_retest: new.is_retest,
            });
        }

        let origin = new.origin;
        let now = self.clock.now();
        let sample = Sample::from_new(new, identifier, now);
        let record = creation_record(&sample, origin, Some(actor), now)?;

        uow.insert_sample(sample.clone())?;
        uow.append_record(record)?;
        Ok(sample)
    }

    /// Internal rerun client, staged if it does not exist yet.
    fn stage_internal_client(&self, uow: &mut dyn UnitOfWork) -> LifecycleResult<(Client, bool)> {
        let name = &self.config.internal_rerun_client_name;
        if let Some(client) = uow.client_by_name(name)? {
            return Ok((client, false));
        }

        let client = Client::new(name.as_str(), false, self.identifiers.api_key());
        uow.insert_client(client.clone())?;
        Ok((client, true))
    }

    fn transition_events(
        &self,
        sample: &Sample,
        previous: SampleState,
        actor: &Actor,
    ) -> Vec<LifecycleEvent> {
        let mut events = vec![LifecycleEvent::SampleTransitioned {
            sample: sample.id,
            identifier: sample.identifier.clone(),
            from: previous,
            to: sample.state,
            actor: actor.clone(),
        }];

        if !self.config.notifications_enabled {
            return events;
        }

        match sample.state {
            SampleState::Communicated => events.push(LifecycleEvent::ResultReady {
                sample: sample.id,
                identifier: sample.identifier.clone(),
                client: sample.client,
                actor: actor.clone(),
            }),
            SampleState::Rejected => events.push(LifecycleEvent::SampleRejected {
                sample: sample.id,
                identifier: sample.identifier.clone(),
                client: sample.client,
                actor: actor.clone(),
            }),
            _ => {}
        }

        events
    }

    // =========================================================================
    // COMMITTED OPERATIONS
    // =========================================================================

    fn create_sample_committed(
        &self,
        new: NewSample,
        ctx: &ActorContext,
    ) -> LifecycleResult<Committed<Sample>> {
        let actor = ctx.require()?;

        let mut uow = self.repository.begin();
        let sample = self.stage_new_sample(uow.as_mut(), new, actor)?;
        uow.commit()?;

        info!(
            sample = %sample.id,
            identifier = %sample.identifier,
            state = %sample.state,
            actor = %actor,
            "Sample created"
        );

        let events = vec![created_event(&sample)];
        Ok((sample, events))
    }

    fn transition_committed(
        &self,
        id: SampleId,
        target: SampleState,
        note: Option<String>,
        ctx: &ActorContext,
    ) -> LifecycleResult<Committed<Sample>> {
        let mut uow = self.repository.begin();
        let mut sample = uow.sample(id)?.ok_or(LifecycleError::SampleNotFound(id))?;

        let outcome = match apply_transition(&mut sample, target, ctx.resolve(), note, self.clock.now()) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    sample = %id,
                    from = %sample.state,
                    to = %target,
                    allowed = ?allowed_targets(sample.state),
                    error = %err,
                    "Transition rejected"
                );
                return Err(err);
            }
        };

        let Some(record) = outcome.record.clone() else {
            debug!(sample = %id, state = %target, "Same-state save, nothing recorded");
            return Ok((sample, Vec::new()));
        };

        let actor = record.actor.clone();
        uow.update_sample(sample.clone())?;
        uow.append_record(record)?;
        uow.commit()?;

        info!(
            sample = %id,
            identifier = %sample.identifier,
            from = %outcome.previous,
            to = %outcome.current,
            actor = %actor,
            "Sample transitioned"
        );

        let events = self.transition_events(&sample, outcome.previous, &actor);
        Ok((sample, events))
    }

    fn retest_committed(
        &self,
        source_id: SampleId,
        reason: &str,
        kind: RetestKind,
        ctx: &ActorContext,
    ) -> LifecycleResult<Committed<Sample>> {
        let mut uow = self.repository.begin();
        let mut source = uow
            .sample(source_id)?
            .ok_or(LifecycleError::SampleNotFound(source_id))?;

        let has_rerun = uow.rerun_from(source_id)?.is_some();
        if let Err(err) = check_retest_preconditions(&source, has_rerun, kind) {
            warn!(
                sample = %source_id,
                identifier = %source.identifier,
                kind = ?kind,
                error = %err,
                "Retest refused"
            );
            return Err(err);
        }

        let actor = ctx.require()?.clone();

        let internal_client = match kind {
            RetestKind::Ordinary => None,
            RetestKind::Posthoc => Some(self.stage_internal_client(uow.as_mut())?),
        };
        let attributes = retest_attributes(&source, internal_client.as_ref().map(|(c, _)| c.id));

        let now = self.clock.now();
        let outcome = apply_transition(&mut source, SampleState::Retest, Some(&actor), None, now)?;
        if let Some(record) = outcome.record.clone() {
            uow.update_sample(source.clone())?;
            uow.append_record(record)?;
        }

        let retest = self.stage_new_sample(uow.as_mut(), attributes, &actor)?;
        uow.insert_rerun(Rerun::new(source.id, retest.id, reason, now))?;
        uow.commit()?;

        if let Some((client, true)) = &internal_client {
            info!(client = %client.id, name = %client.name, "Internal rerun client created");
        }
        info!(
            source = %source.id,
            retest = %retest.id,
            identifier = %retest.identifier,
            reason = reason,
            posthoc = kind.is_posthoc(),
            actor = %actor,
            "Retest created"
        );

        let mut events = Vec::new();
        if outcome.changed() {
            events.extend(self.transition_events(&source, outcome.previous, &actor));
        }
        events.push(created_event(&retest));
        events.push(LifecycleEvent::RetestCreated {
            source: source.id,
            retest: retest.id,
            identifier: retest.identifier.clone(),
            reason: reason.to_string(),
            posthoc: kind.is_posthoc(),
        });

        Ok((retest, events))
    }
}

fn created_event(sample: &Sample) -> LifecycleEvent {
    LifecycleEvent::SampleCreated {
        sample: sample.id,
        identifier: sample.identifier.clone(),
        client: sample.client,
        state: sample.state,
        is_retest: sample.is_retest,
    }
}

#[async_trait]
impl SampleLifecycleApi for SampleLifecycleService {
    async fn create_sample(&self, new: NewSample, ctx: &ActorContext) -> LifecycleResult<Sample> {
        let (sample, events) = self.create_sample_committed(new, ctx)?;
        self.publish_all(events).await;
        Ok(sample)
    }

    async fn attempt_transition(
        &self,
        sample: SampleId,
        target: SampleState,
        ctx: &ActorContext,
    ) -> LifecycleResult<Sample> {
        let (sample, events) = self.transition_committed(sample, target, None, ctx)?;
        self.publish_all(events).await;
        Ok(sample)
    }

    async fn transition_with_note(
        &self,
        sample: SampleId,
        target: SampleState,
        note: String,
        ctx: &ActorContext,
    ) -> LifecycleResult<Sample> {
        let (sample, events) = self.transition_committed(sample, target, Some(note), ctx)?;
        self.publish_all(events).await;
        Ok(sample)
    }

    async fn create_retest(
        &self,
        source: SampleId,
        reason: &str,
        ctx: &ActorContext,
    ) -> LifecycleResult<Sample> {
        let (retest, events) = self.retest_committed(source, reason, RetestKind::Ordinary, ctx)?;
        self.publish_all(events).await;
        Ok(retest)
    }

    async fn create_posthoc_retest(
        &self,
        source: SampleId,
        reason: &str,
        ctx: &ActorContext,
    ) -> LifecycleResult<Sample> {
        let (retest, events) = self.retest_committed(source, reason, RetestKind::Posthoc, ctx)?;
        self.publish_all(events).await;
        Ok(retest)
    }

    fn place_in_well(&self, id: SampleId, placement: Placement) -> LifecycleResult<Sample> {
        let mut uow = self.repository.begin();
        let mut sample = uow.sample(id)?.ok_or(LifecycleError::SampleNotFound(id))?;

        if sample.placement.as_ref() == Some(&placement) {
            return Ok(sample);
        }

        if let Err(err) = self.placement.validate_placement(&sample, &placement) {
            warn!(
                sample = %id,
                placement = %placement,
                error = %err,
                "Placement refused"
            );
            return Err(err);
        }

        sample.placement = Some(placement);
        sample.updated_at = self.clock.now();
        uow.update_sample(sample.clone())?;
        uow.commit()?;

        if let Some(p) = &sample.placement {
            info!(sample = %id, placement = %p, "Sample placed");
        }
        Ok(sample)
    }

    fn create_client(&self, name: &str, notify: bool) -> LifecycleResult<Client> {
        let client = Client::new(name, notify, self.identifiers.api_key());

        let mut uow = self.repository.begin();
        uow.insert_client(client.clone())?;
        uow.commit()?;

        info!(client = %client.id, name = %client.name, notify, "Client created");
        Ok(client)
    }

    fn sample(&self, id: SampleId) -> LifecycleResult<Sample> {
        self.repository
            .sample(id)?
            .ok_or(LifecycleError::SampleNotFound(id))
    }

    fn records(&self, id: SampleId) -> LifecycleResult<Vec<Record>> {
        self.sample(id)?;
        Ok(self.repository.records(id)?)
    }

    fn rerun_from(&self, source: SampleId) -> LifecycleResult<Option<Rerun>> {
        Ok(self.repository.rerun_from(source)?)
    }

    fn rerun_for(&self, retest: SampleId) -> LifecycleResult<Option<Rerun>> {
        Ok(self.repository.rerun_for(retest)?)
    }

    fn source_of(&self, retest: SampleId) -> LifecycleResult<Option<Sample>> {
        match self.repository.rerun_for(retest)? {
            Some(rerun) => Ok(self.repository.sample(rerun.source)?),
            None => Ok(None),
        }
    }

    fn retest_of(&self, source: SampleId) -> LifecycleResult<Option<Sample>> {
        match self.repository.rerun_from(source)? {
            Some(rerun) => Ok(self.repository.sample(rerun.retest)?),
            None => Ok(None),
        }
    }

    fn client(&self, id: ClientId) -> LifecycleResult<Option<Client>> {
        Ok(self.repository.client(id)?)
    }
}
