//! Plain-text rendering of the attempt audit log.

use std::fmt::Write;

use vigil_types::{ScoredAttempt, Timestamp};
use vigil_utils::format_age;

const HEADER: [&str; 9] = [
    "AGE", "ELECTION", "VOTER", "ACCOUNT", "IP", "DEVICE", "SCORE", "STATUS", "REASONS",
];

fn fingerprint_prefix(fingerprint: &str) -> String {
    if fingerprint.chars().count() > 8 {
        let head: String = fingerprint.chars().take(8).collect();
        format!("{head}...")
    } else {
        fingerprint.to_string()
    }
}

fn row(record: &ScoredAttempt, now: Timestamp) -> [String; 9] {
    let attempt = record.attempt();
    let status = if record.is_suspicious() { "Suspicious" } else { "Clean" };
    let reasons = if record.reasons().is_empty() {
        "N/A".to_string()
    } else {
        record.reasons().join(", ")
    };
    [
        format_age(record.timestamp().as_secs(), now.as_secs()),
        attempt.election_id().to_string(),
        attempt.voter_address().abbreviated(),
        attempt.account_id().to_string(),
        attempt.ip_address().to_string(),
        fingerprint_prefix(attempt.device_fingerprint()),
        record.score().to_string(),
        status.to_string(),
        reasons,
    ]
}

/// Render records as an aligned table, in the order given.
pub fn render_table(records: &[ScoredAttempt], now: Timestamp) -> String {
    if records.is_empty() {
        return "No vote attempts recorded yet.\n".to_string();
    }

    let rows: Vec<[String; 9]> = records.iter().map(|r| row(r, now)).collect();
    let mut widths = HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADER.map(str::to_string);
    for cells in std::iter::once(&header).chain(rows.iter()) {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            // The last column is not padded.
            if i + 1 == cells.len() {
                line.push_str(cell);
            } else {
                let _ = write!(line, "{:<width$}  ", cell, width = widths[i]);
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_types::{
        AccountId, Assessment, ElectionId, RiskScore, VoteAttempt, VoterAddress,
    };

    fn record(voter: &str, score_bps: u32, reasons: Vec<&str>, secs: u64) -> ScoredAttempt {
        let attempt = VoteAttempt::new(
            VoterAddress::parse(voter).unwrap(),
            ElectionId::new(12),
            AccountId::parse("uid-42").unwrap(),
            "198.51.100.7",
            "a1b2c3d4e5f6a7b8",
        );
        let assessment = Assessment::new(
            RiskScore::from_bps(score_bps),
            reasons.into_iter().map(String::from).collect(),
            RiskScore::from_bps(8_000),
        );
        ScoredAttempt::new(attempt, assessment, Timestamp::from_secs(secs))
    }

    #[test]
    fn empty_log_message() {
        assert_eq!(render_table(&[], Timestamp::from_secs(0)), "No vote attempts recorded yet.\n");
    }

    #[test]
    fn renders_clean_and_suspicious_rows() {
        let records = vec![
            record(
                "0x1234567890abcdef1234567890abcdef12345678",
                9_000,
                vec!["User has already submitted a vote for this election"],
                1_000,
            ),
            record("0xabc", 0, vec![], 700),
        ];

        let table = render_table(&records, Timestamp::from_secs(1_060));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("AGE"));
        assert!(lines[1].starts_with("1m 0s ago"));
        assert!(lines[1].contains("0x1234...5678"));
        assert!(lines[1].contains("a1b2c3d4..."));
        assert!(lines[1].contains("0.90"));
        assert!(lines[1].contains("Suspicious"));
        assert!(lines[1].ends_with("User has already submitted a vote for this election"));
        assert!(lines[2].contains("Clean"));
        assert!(lines[2].ends_with("N/A"));
    }

    #[test]
    fn short_fingerprint_not_truncated() {
        assert_eq!(fingerprint_prefix("unknown"), "unknown");
        assert_eq!(fingerprint_prefix("unknown_device"), "unknown_...");
    }
}
