//! End-to-end gate evaluations over the LMDB attempt log.

use std::sync::Arc;

use vigil_fraud::{FraudConfig, RawVoteInputs, VoteGate, VoteRequest};
use vigil_nullables::NullClock;
use vigil_store::AttemptStore;
use vigil_store_lmdb::{LmdbAttemptStore, LmdbEnvironment};
use vigil_types::RiskScore;

fn temp_store() -> (tempfile::TempDir, Arc<LmdbAttemptStore>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let env = LmdbEnvironment::open(dir.path(), 4, 10 * 1024 * 1024).expect("open env");
    (dir, Arc::new(env.attempt_store()))
}

fn inputs(voter: &str, election: u64, ip: &str, device: &str) -> RawVoteInputs {
    RawVoteInputs {
        request: VoteRequest {
            voter_address: voter.to_string(),
            election_id: Some(election),
            account_id: format!("acct-{voter}"),
        },
        ip_address: Ok(ip.to_string()),
        device_fingerprint: Ok(device.to_string()),
    }
}

#[test]
fn every_evaluation_appends_exactly_one_record() {
    let (_dir, store) = temp_store();
    let clock = Arc::new(NullClock::new(1_000_000));
    let gate = VoteGate::new(Arc::clone(&store), clock.clone(), FraudConfig::default()).unwrap();

    let outcomes: Vec<bool> = (0..8)
        .map(|i| {
            clock.advance(5);
            gate.evaluate(inputs("0xsame", 1, "198.51.100.1", &format!("dev-{i}")))
                .unwrap()
                .proceed
        })
        .collect();

    assert!(outcomes[0]);
    assert!(outcomes[1..].iter().all(|p| !p));
    assert_eq!(store.attempt_count().unwrap(), 8);

    let newest = &store.recent(1).unwrap()[0];
    assert!(newest.is_suspicious());
    // Duplicate vote plus IP velocity (7 prior attempts from the same address).
    assert_eq!(newest.score(), RiskScore::from_bps(13_000));
    assert_eq!(newest.reasons().len(), 2);
}

#[test]
fn triple_match_scores_uncapped() {
    let (_dir, store) = temp_store();
    let clock = Arc::new(NullClock::new(2_000_000));
    let gate = VoteGate::new(Arc::clone(&store), clock.clone(), FraudConfig::default()).unwrap();

    for i in 0..4 {
        gate.evaluate(inputs(&format!("0xother{i}"), 9, "203.0.113.9", "kiosk")).unwrap();
    }
    gate.evaluate(inputs("0xvoter", 9, "203.0.113.9", "kiosk")).unwrap();
    clock.advance(60);

    let decision = gate.evaluate(inputs("0xvoter", 9, "203.0.113.9", "kiosk")).unwrap();
    assert!(!decision.proceed);
    assert_eq!(decision.score, RiskScore::from_bps(17_000));
    assert_eq!(
        decision.reasons,
        vec![
            "High frequency of votes from IP (5 attempts)".to_string(),
            "High frequency of votes from device (5 attempts)".to_string(),
            "User has already submitted a vote for this election".to_string(),
        ]
    );
}

#[test]
fn history_expires_after_window() {
    let (_dir, store) = temp_store();
    let clock = Arc::new(NullClock::new(3_000_000));
    let gate = VoteGate::new(Arc::clone(&store), clock.clone(), FraudConfig::default()).unwrap();

    assert!(gate.evaluate(inputs("0xa", 4, "192.0.2.1", "d")).unwrap().proceed);
    clock.advance(601);
    assert!(gate.evaluate(inputs("0xa", 4, "192.0.2.1", "d")).unwrap().proceed);
    assert_eq!(store.attempt_count().unwrap(), 2);
}

#[test]
fn concurrent_evaluations_all_recorded() {
    let (_dir, store) = temp_store();
    let clock = Arc::new(NullClock::new(4_000_000));
    let gate = Arc::new(
        VoteGate::new(Arc::clone(&store), clock, FraudConfig::default()).unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || {
                gate.evaluate(inputs(&format!("0xvoter{i}"), 1, &format!("10.1.0.{i}"), &format!("d{i}")))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().proceed);
    }
    assert_eq!(store.attempt_count().unwrap(), 8);
}
