use proptest::prelude::*;

use vigil_types::{Assessment, RiskScore, Timestamp};

proptest! {
    /// Timestamp ordering: from_millis(a) <= from_millis(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::from_millis(a);
        let tb = Timestamp::from_millis(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// window_start never exceeds the instant and saturates at the epoch.
    #[test]
    fn window_start_saturates(now in 0u64..1_000_000_000, window in 0u64..2_000_000) {
        let start = Timestamp::from_millis(now).window_start(window);
        prop_assert!(start <= Timestamp::from_millis(now));
        prop_assert_eq!(start.as_millis(), now.saturating_sub(window * 1_000));
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::from_secs(base);
        let now = Timestamp::from_secs(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// Suspicion is exactly `score >= threshold`.
    #[test]
    fn suspicion_matches_threshold(score in 1u32..30_000, threshold in 0u32..30_000) {
        let assessment = Assessment::new(
            RiskScore::from_bps(score),
            vec!["reason".to_string()],
            RiskScore::from_bps(threshold),
        );
        prop_assert_eq!(assessment.is_suspicious(), score >= threshold);
    }

    /// RiskScore addition never wraps.
    #[test]
    fn risk_score_add_saturates(a in 0u32..u32::MAX, b in 0u32..u32::MAX) {
        let sum = RiskScore::from_bps(a) + RiskScore::from_bps(b);
        prop_assert_eq!(sum.bps(), a.saturating_add(b));
    }
}
