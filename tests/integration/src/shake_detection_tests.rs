//! Sensor stream to dispatched alert
//!
//! Covers both ways of feeding samples: inline through the orchestrator and
//! through the single-owner detection worker.

use crate::test_utils::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use safeguard_core::{SafeguardConfig, SensorSample, TriggerSource};
use safeguard_motion::{spawn_detection, MotionError, DEFAULT_SAMPLE_BUFFER};
use std::time::Duration;

fn harness() -> Harness {
    Harness::new(
        &SafeguardConfig::default(),
        ScriptedLocation::at(40.7128, -74.006),
        phone_contacts(2),
        RecordingSender::new(),
    )
}

#[tokio::test]
async fn test_shake_sends_one_alert_per_cooldown() {
    let h = harness();
    h.orchestrator.enable_shake_detection(true).unwrap();

    let mut samples = resting(0, 100);
    samples.extend(shaking(2_000, 10));
    // still inside the 6s cooldown
    samples.extend(shaking(4_000, 10));

    let mut outcomes = Vec::new();
    for sample in samples {
        if let Some(outcome) = h.orchestrator.on_sample(sample).await {
            outcomes.push(outcome);
        }
    }

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].trigger().source, TriggerSource::ShakeDetected);
    assert_eq!(outcomes[0].report().map(|r| r.delivered), Some(2));
    assert_eq!(h.sender.sent().len(), 2);
}

#[tokio::test]
async fn test_shaking_again_after_cooldown_sends_again() {
    let h = harness();
    h.orchestrator.enable_shake_detection(true).unwrap();

    let mut samples = resting(0, 100);
    samples.extend(shaking(2_000, 10));
    samples.extend(resting(3_000, 400));
    samples.extend(shaking(11_000, 10));

    let mut triggers = Vec::new();
    for sample in samples {
        if let Some(outcome) = h.orchestrator.on_sample(sample).await {
            triggers.push(outcome.trigger().timestamp_ms);
        }
    }

    assert_eq!(triggers.len(), 2);
    assert!(triggers[1] - triggers[0] > 6_000);
}

#[tokio::test]
async fn test_random_jitter_never_triggers() {
    let h = harness();
    h.orchestrator.enable_shake_detection(true).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for i in 0..2_000u64 {
        let sample = SensorSample::new(
            rng.gen_range(-0.3..0.3),
            rng.gen_range(-0.3..0.3),
            G + rng.gen_range(-0.3..0.3),
            1_000 + i * 20,
        );
        assert!(h.orchestrator.on_sample(sample).await.is_none());
    }
    assert!(h.sender.sent().is_empty());
}

#[tokio::test]
async fn test_pause_resume_starts_clean_session() {
    let h = harness();
    h.orchestrator.enable_shake_detection(true).unwrap();

    // two strong shakes, one short of a trigger
    for sample in resting(0, 100).into_iter().chain(shaking(2_000, 3)) {
        assert!(h.orchestrator.on_sample(sample).await.is_none());
    }

    h.orchestrator.disable_shake_detection();
    for sample in shaking(2_300, 3) {
        assert!(h.orchestrator.on_sample(sample).await.is_none());
    }

    // a carried-over count would fire on the first strong sample here
    h.orchestrator.enable_shake_detection(true).unwrap();
    for sample in shaking(2_600, 3) {
        assert!(h.orchestrator.on_sample(sample).await.is_none());
    }
    assert!(h.sender.sent().is_empty());
}

#[tokio::test]
async fn test_device_without_accelerometer() {
    let h = harness();
    assert_eq!(
        h.orchestrator.enable_shake_detection(false),
        Err(MotionError::NoAccelerometer)
    );
    for sample in shaking(0, 20) {
        assert!(h.orchestrator.on_sample(sample).await.is_none());
    }
}

#[tokio::test]
async fn test_detection_worker_feeds_orchestrator() {
    let h = harness();
    let (handle, mut triggers) = spawn_detection(
        SafeguardConfig::default().detector,
        DEFAULT_SAMPLE_BUFFER,
    );

    let mut samples = resting(0, 100);
    samples.extend(shaking(2_000, 10));
    for sample in samples {
        assert!(handle.feed(sample).await);
    }

    let trigger = tokio::time::timeout(Duration::from_secs(5), triggers.recv())
        .await
        .expect("worker should emit a trigger")
        .expect("trigger channel open");
    assert_eq!(trigger.source, TriggerSource::ShakeDetected);
    assert_eq!(trigger.timestamp_ms, 2_400);

    let outcome = h.orchestrator.handle_trigger(trigger).await;
    assert!(outcome.is_dispatched());
    assert_eq!(h.sender.sent().len(), 2);

    // the trigger fired on the 105th sample
    let processed = handle.stop().await.unwrap();
    assert!(processed >= 105);

    // worker is gone, so the stream closes after any buffered triggers
    let mut rest = Vec::new();
    let handled = h
        .orchestrator
        .serve_triggers(triggers, |outcome| rest.push(outcome))
        .await;
    assert_eq!(handled, 0);
    assert!(rest.is_empty());
}
