#![no_main]

use libfuzzer_sys::fuzz_target;

use vigil_fraud::{FraudConfig, FraudScorer};
use vigil_types::{
    AccountId, Assessment, ElectionId, RiskScore, ScoredAttempt, Timestamp, VoteAttempt,
    VoterAddress,
};

// Each 4-byte chunk is one attempt: voter, election, ip, device drawn from
// small alphabets so that collisions are frequent. The first chunk is the
// candidate, the rest form the window.
fn attempt(chunk: &[u8]) -> VoteAttempt {
    VoteAttempt::new(
        VoterAddress::parse(format!("0xvoter{}", chunk[0] % 8)).unwrap(),
        ElectionId::new(u64::from(chunk[1] % 3)),
        AccountId::parse("fuzz").unwrap(),
        format!("10.0.0.{}", chunk[2] % 4),
        format!("device-{}", chunk[3] % 4),
    )
}

fuzz_target!(|data: &[u8]| {
    let mut chunks = data.chunks_exact(4);
    let Some(first) = chunks.next() else {
        return;
    };
    let candidate = attempt(first);
    let window: Vec<ScoredAttempt> = chunks
        .map(|chunk| {
            let assessment = Assessment::new(RiskScore::from_bps(0), Vec::new(), RiskScore::from_bps(8000));
            ScoredAttempt::new(attempt(chunk), assessment, Timestamp::from_secs(0))
        })
        .collect();

    let scorer = FraudScorer::new(&FraudConfig::default());
    let assessment = scorer.score(&candidate, &window);

    assert!(assessment.score().bps() <= 17_000);
    assert_eq!(assessment.score().is_zero(), assessment.reasons().is_empty());
    assert_eq!(
        assessment.is_suspicious(),
        assessment.score() >= RiskScore::from_bps(8000)
    );
});
