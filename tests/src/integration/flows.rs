//! # Lifecycle → Statistics Flows
//!
//! Samples are driven through the real lifecycle service; the statistics
//! service then reads the same in-memory store through the audit trail
//! port.
//!
//! Scenarios cover one client's day as the lab sees it:
//! - API requests that get communicated, rejected or retested
//! - posthoc retests of communicated samples (internal checks)
//! - control samples, which never count
//! - activity spread over several days and the weekly reports

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

    use lims_01_sample_lifecycle::{
        ActorContext, Client, LifecycleConfig, LoggingNotificationDispatcher, NewSample, Sample,
        SampleLifecycleApi, SampleOrigin, API_ORIGIN_NOTE, INCONCLUSIVE, POSITIVE,
    };
    use lims_02_statistics::{DailyCount, Stat, StatisticsApi, API_REQUEST_NOTE};
    use lims_runtime::container::{LimsContainer, RuntimeConfig};
    use shared_types::{Actor, ManualClock, SampleState};

    use SampleState::*;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct Lab {
        container: LimsContainer,
        clock: Arc<ManualClock>,
        ctx: ActorContext,
    }

    impl Lab {
        fn new() -> Self {
            let clock = Arc::new(ManualClock::new(start()));
            let container = LimsContainer::build(
                RuntimeConfig {
                    lifecycle: LifecycleConfig::default(),
                    ..RuntimeConfig::default()
                },
                clock.clone(),
                Arc::new(LoggingNotificationDispatcher),
            );
            Self {
                container,
                clock,
                ctx: ActorContext::for_actor(Actor::new("lab-tech")),
            }
        }

        fn lifecycle(&self) -> &dyn SampleLifecycleApi {
            self.container.lifecycle.as_ref()
        }

        fn stats(&self) -> &dyn StatisticsApi {
            self.container.statistics.as_ref()
        }

        fn client(&self) -> Client {
            self.lifecycle().create_client("Clinic North", true).unwrap()
        }

        async fn request(&self, client: &Client) -> Sample {
            self.lifecycle()
                .create_sample(
                    NewSample::for_client(client.id).with_origin(SampleOrigin::Api),
                    &self.ctx,
                )
                .await
                .unwrap()
        }

        async fn create(&self, new: NewSample) -> Sample {
            self.lifecycle().create_sample(new, &self.ctx).await.unwrap()
        }

        async fn walk(&self, sample: &Sample, states: &[SampleState]) {
            for state in states {
                self.lifecycle()
                    .attempt_transition(sample.id, *state, &self.ctx)
                    .await
                    .unwrap();
            }
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    const TO_COMMCOMPLETE: [SampleState; 8] = [
        Preparing,
        Prepared,
        Prepared,
        Tested,
        Analysed,
        Communicated,
        Commcomplete,
        Commcomplete,
    ];

    fn only_row(stats: &[Stat]) -> &Stat {
        assert_eq!(stats.len(), 1, "expected a single day: {stats:?}");
        &stats[0]
    }

    // =========================================================================
    // SINGLE SAMPLE
    // =========================================================================

    #[test]
    fn test_api_note_agrees_across_subsystems() {
        assert_eq!(API_ORIGIN_NOTE, API_REQUEST_NOTE);
    }

    #[tokio::test]
    async fn test_requested_and_communicated() {
        let lab = Lab::new();
        let client = lab.client();
        let sample = lab.request(&client).await;
        lab.walk(&sample, &TO_COMMCOMPLETE).await;

        let stats = lab.stats().stats_for(client.id).unwrap();
        let row = only_row(&stats);
        assert_eq!(row.date, Some(start().date_naive()));
        assert_eq!(row.requested, 1);
        assert_eq!(row.communicated, 1);
        assert_eq!(row.rejects, 0);
        assert_eq!(row.retests, 0);
        assert_eq!(row.internalchecks, 0);
    }

    #[tokio::test]
    async fn test_created_straight_at_commcomplete() {
        let lab = Lab::new();
        let client = lab.client();
        lab.create(NewSample::for_client(client.id).with_state(Commcomplete))
            .await;

        let stats = lab.stats().stats_for(client.id).unwrap();
        let row = only_row(&stats);
        assert_eq!(row.communicated, 1);
        assert_eq!(row.requested, 0);
    }

    #[tokio::test]
    async fn test_requested_and_rejected() {
        let lab = Lab::new();
        let client = lab.client();
        let sample = lab.request(&client).await;
        lab.walk(&sample, &[Preparing, Rejected]).await;

        let stats = lab.stats().stats_for(client.id).unwrap();
        let row = only_row(&stats);
        assert_eq!(row.requested, 1);
        assert_eq!(row.rejects, 1);
        assert_eq!(row.communicated, 0);
    }

    #[tokio::test]
    async fn test_sample_not_created_from_api_is_not_requested() {
        let lab = Lab::new();
        let client = lab.client();
        lab.create(NewSample::for_client(client.id)).await;

        let stats = lab.stats().stats_for(client.id).unwrap();
        assert_eq!(only_row(&stats), &Stat::empty(start().date_naive()));
    }

    #[tokio::test]
    async fn test_control_samples_never_count() {
        let lab = Lab::new();
        let client = lab.client();
        let control = lab
            .create(
                NewSample::for_client(client.id)
                    .with_origin(SampleOrigin::Api)
                    .control(),
            )
            .await;
        lab.walk(&control, &TO_COMMCOMPLETE).await;

        let stats = lab.stats().stats_for(client.id).unwrap();
        assert_eq!(stats, vec![Stat::placeholder(); 2]);
    }

    // =========================================================================
    // RETESTS
    // =========================================================================

    #[tokio::test]
    async fn test_retest_then_communicated() {
        let lab = Lab::new();
        let client = lab.client();
        let sample = lab.request(&client).await;
        lab.walk(&sample, &[Preparing]).await;

        let retest = lab
            .lifecycle()
            .create_retest(sample.id, POSITIVE, &lab.ctx)
            .await
            .unwrap();
        lab.walk(&retest, &TO_COMMCOMPLETE).await;

        let stats = lab.stats().stats_for(client.id).unwrap();
        let row = only_row(&stats);
        assert_eq!(row.requested, 1);
        assert_eq!(row.communicated, 1);
        assert_eq!(row.retests, 1);
        assert_eq!(row.internalchecks, 0);
        assert_eq!(row.rejects, 0);
    }

    #[tokio::test]
    async fn test_posthoc_counts_as_internal_check() {
        let lab = Lab::new();
        let client = lab.client();
        let sample = lab.request(&client).await;
        lab.walk(&sample, &TO_COMMCOMPLETE).await;

        let retest = lab
            .lifecycle()
            .create_posthoc_retest(sample.id, POSITIVE, &lab.ctx)
            .await
            .unwrap();
        lab.walk(&retest, &TO_COMMCOMPLETE).await;

        let stats = lab.stats().stats_for(client.id).unwrap();
        let row = only_row(&stats);
        assert_eq!(row.requested, 1);
        assert_eq!(row.communicated, 1);
        assert_eq!(row.retests, 0);
        assert_eq!(row.internalchecks, 1);
        assert_eq!(row.rejects, 0);

        // The retest itself is the internal client's business
        let internal = lab.stats().stats_for(retest.client).unwrap();
        let row = only_row(&internal);
        assert_eq!(row.communicated, 1);
        assert_eq!(row.requested, 0);
    }

    #[tokio::test]
    async fn test_posthoc_and_ordinary_retest_same_day() {
        let lab = Lab::new();
        let client = lab.client();

        let first = lab.request(&client).await;
        lab.walk(&first, &TO_COMMCOMPLETE).await;
        lab.lifecycle()
            .create_posthoc_retest(first.id, POSITIVE, &lab.ctx)
            .await
            .unwrap();

        let second = lab.request(&client).await;
        lab.walk(&second, &[Preparing, Prepared, Prepared, Tested]).await;
        lab.lifecycle()
            .create_retest(second.id, INCONCLUSIVE, &lab.ctx)
            .await
            .unwrap();

        let stats = lab.stats().stats_for(client.id).unwrap();
        let row = only_row(&stats);
        assert_eq!(row.requested, 2);
        assert_eq!(row.communicated, 1);
        assert_eq!(row.retests, 1);
        assert_eq!(row.internalchecks, 1);
        assert_eq!(row.rejects, 0);
    }

    // =========================================================================
    // MULTIPLE DAYS
    // =========================================================================

    #[tokio::test]
    async fn test_activity_split_by_record_date() {
        let lab = Lab::new();
        let client = lab.client();

        let sample = lab.request(&client).await;
        lab.walk(&sample, &[Preparing, Prepared, Tested]).await;

        lab.clock.advance(Duration::days(1));
        lab.walk(&sample, &[Analysed, Communicated, Commcomplete]).await;

        let stats = lab.stats().stats_for(client.id).unwrap();
        assert_eq!(stats.len(), 2);

        let today = start().date_naive() + Duration::days(1);
        assert_eq!(stats[0].date, Some(today));
        assert_eq!(stats[0].communicated, 1);
        assert_eq!(stats[0].requested, 0);

        assert_eq!(stats[1].date, Some(start().date_naive()));
        assert_eq!(stats[1].requested, 1);
        assert_eq!(stats[1].communicated, 0);
    }

    #[tokio::test]
    async fn test_weekly_reports_follow_creation_dates() {
        let lab = Lab::new();
        let client = lab.client();

        // Outside the window
        lab.clock.set(start() - Duration::days(10));
        lab.create(NewSample::for_client(client.id).with_state(Commcomplete))
            .await;

        // Three days ago: rejected after analysis
        lab.clock.set(start() - Duration::days(3));
        let rejected = lab
            .create(NewSample::for_client(client.id).with_state(Analysed))
            .await;
        lab.walk(&rejected, &[Rejected]).await;

        // Today: one analysed, one still waiting
        lab.clock.set(start());
        lab.create(NewSample::for_client(client.id).with_state(Analysed))
            .await;
        lab.create(NewSample::for_client(client.id)).await;

        let today = NaiveDate::from_ymd_opt(2024, 5, 10);
        let three_days_ago = NaiveDate::from_ymd_opt(2024, 5, 7);

        assert_eq!(
            lab.stats().requested_last_week().unwrap(),
            vec![
                DailyCount { date: today, count: 2 },
                DailyCount { date: three_days_ago, count: 1 },
            ]
        );
        assert_eq!(
            lab.stats().tested_last_week().unwrap(),
            vec![
                DailyCount { date: today, count: 1 },
                DailyCount { date: three_days_ago, count: 1 },
            ]
        );

        let rates = lab.stats().failure_rate_last_week().unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].rate, 0.0);
        assert_eq!(rates[1].rate, 1.0);

        // Window-free: the old commcomplete sample counts too
        assert_eq!(lab.stats().total_tests().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_empty_lab_reports_placeholders() {
        let lab = Lab::new();
        assert_eq!(
            lab.stats().requested_last_week().unwrap(),
            vec![DailyCount::placeholder(); 2]
        );
        assert_eq!(lab.stats().failure_rate_last_week().unwrap().len(), 2);
        assert_eq!(lab.stats().total_tests().unwrap(), 0);
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_pipelines_with_concurrent_reads() {
        let lab = Arc::new(Lab::new());
        let client = lab.client();

        let mut samples = Vec::new();
        for _ in 0..16 {
            samples.push(lab.request(&client).await);
        }

        let mut writers = Vec::new();
        for sample in samples {
            let lab = lab.clone();
            writers.push(tokio::spawn(async move {
                lab.walk(&sample, &TO_COMMCOMPLETE).await;
            }));
        }

        let reader = {
            let lab = lab.clone();
            let client = client.id;
            tokio::spawn(async move {
                for _ in 0..50 {
                    let stats = lab.stats().stats_for(client).unwrap();
                    assert!(stats[0].communicated <= 16);
                    tokio::task::yield_now().await;
                }
            })
        };

        for writer in writers {
            writer.await.unwrap();
        }
        reader.await.unwrap();

        let stats = lab.stats().stats_for(client.id).unwrap();
        let row = only_row(&stats);
        assert_eq!(row.requested, 16);
        assert_eq!(row.communicated, 16);
        assert_eq!(lab.container.store.record_count(), 16 * 7);
    }
}
