//! # Runtime Notification Flows
//!
//! Starts `LimsRuntime` with a recording dispatcher and checks which
//! lifecycle changes end up as client notifications.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;
    use tokio::time::timeout;

    use lims_01_sample_lifecycle::adapters::{NotificationKind, SentNotification};
    use lims_01_sample_lifecycle::{
        ActorContext, LifecycleConfig, NewSample, RecordingNotificationDispatcher,
        SampleLifecycleApi, INCONCLUSIVE,
    };
    use lims_runtime::container::{LimsContainer, RuntimeConfig};
    use lims_runtime::LimsRuntime;
    use shared_types::{Actor, ManualClock, SampleState};

    use SampleState::*;

    async fn runtime(notifications: bool) -> (LimsRuntime, Arc<RecordingNotificationDispatcher>) {
        let dispatcher = Arc::new(RecordingNotificationDispatcher::new());
        let config = RuntimeConfig {
            lifecycle: LifecycleConfig::default().with_notifications(notifications),
            ..RuntimeConfig::default()
        };
        let runtime = LimsRuntime::with_container(LimsContainer::build(
            config,
            Arc::new(ManualClock::new(Utc::now())),
            dispatcher.clone(),
        ));
        runtime.start().await.unwrap();
        (runtime, dispatcher)
    }

    async fn wait_for(dispatcher: &RecordingNotificationDispatcher, n: usize) -> Vec<SentNotification> {
        timeout(Duration::from_secs(2), async {
            loop {
                let sent = dispatcher.sent();
                if sent.len() >= n {
                    return sent;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_result_and_rejection_notifications() {
        let (runtime, dispatcher) = runtime(true).await;
        let lifecycle = runtime.container().lifecycle.clone();
        let ctx = ActorContext::for_actor(Actor::new("night-shift"));
        let client = lifecycle.create_client("Clinic", true).unwrap();

        let good = lifecycle
            .create_sample(NewSample::for_client(client.id).with_state(Analysed), &ctx)
            .await
            .unwrap();
        let bad = lifecycle
            .create_sample(NewSample::for_client(client.id), &ctx)
            .await
            .unwrap();

        lifecycle
            .attempt_transition(good.id, Communicated, &ctx)
            .await
            .unwrap();
        lifecycle.attempt_transition(bad.id, Rejected, &ctx).await.unwrap();

        let sent = wait_for(&dispatcher, 2).await;
        assert_eq!(sent.len(), 2);
        assert!(sent
            .iter()
            .any(|n| n.sample == good.id && n.kind == NotificationKind::Result));
        assert!(sent
            .iter()
            .any(|n| n.sample == bad.id && n.kind == NotificationKind::Rejection));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_override_actor_is_notified() {
        let (runtime, dispatcher) = runtime(true).await;
        let lifecycle = runtime.container().lifecycle.clone();
        let ctx = ActorContext::for_actor(Actor::new("night-shift"));

        let sample = lifecycle
            .create_sample(
                NewSample::for_client(shared_types::ClientId::new()).with_state(Analysed),
                &ctx,
            )
            .await
            .unwrap();

        ctx.scoped_override(Actor::new("alice"), |scoped| {
            let lifecycle = lifecycle.clone();
            async move {
                lifecycle
                    .attempt_transition(sample.id, Communicated, &scoped)
                    .await
                    .unwrap();
            }
        })
        .await;

        let sent = wait_for(&dispatcher, 1).await;
        assert_eq!(sent[0].actor, Actor::new("alice"));

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_disabled_notifications_send_nothing() {
        let (runtime, dispatcher) = runtime(false).await;
        let lifecycle = runtime.container().lifecycle.clone();
        let ctx = ActorContext::for_actor(Actor::new("tech"));

        let sample = lifecycle
            .create_sample(NewSample::for_client(shared_types::ClientId::new()), &ctx)
            .await
            .unwrap();
        lifecycle
            .attempt_transition(sample.id, Rejected, &ctx)
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(dispatcher.sent().is_empty());

        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_posthoc_retest_results_stay_internal() {
        let (runtime, dispatcher) = runtime(true).await;
        let lifecycle = runtime.container().lifecycle.clone();
        let ctx = ActorContext::for_actor(Actor::new("tech"));
        let client = lifecycle.create_client("Clinic", true).unwrap();

        let source = lifecycle
            .create_sample(NewSample::for_client(client.id).with_state(Commcomplete), &ctx)
            .await
            .unwrap();
        let retest = lifecycle
            .create_posthoc_retest(source.id, INCONCLUSIVE, &ctx)
            .await
            .unwrap();

        for state in [Preparing, Prepared, Tested, Analysed, Communicated] {
            lifecycle
                .attempt_transition(retest.id, state, &ctx)
                .await
                .unwrap();
        }
        // Then a real client result, so the handler has provably caught up
        let marker = lifecycle
            .create_sample(NewSample::for_client(client.id).with_state(Analysed), &ctx)
            .await
            .unwrap();
        lifecycle
            .attempt_transition(marker.id, Communicated, &ctx)
            .await
            .unwrap();

        let sent = wait_for(&dispatcher, 1).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].sample, marker.id);

        runtime.shutdown().await;
    }
}
