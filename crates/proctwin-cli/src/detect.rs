use serde::Serialize;
use tracing::debug;

const CASE_KEYWORDS: &[&str] = &["case", "id", "client", "user", "customer"];
const STEP_KEYWORDS: &[&str] = &["step", "étape", "stage", "status", "event", "action"];
const TIMESTAMP_KEYWORDS: &[&str] = &["time", "date", "timestamp", "created", "updated"];

/// Confidence reported for keyword-based guesses
pub const HEURISTIC_CONFIDENCE: f64 = 0.5;

/// Best guess of which header plays which role; `None` when nothing matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnGuess {
    pub case_id: Option<String>,
    pub step: Option<String>,
    pub timestamp: Option<String>,
    pub confidence: f64,
}

/// Guess column roles from header names.
///
/// Each role takes the first header containing one of its keywords
/// (case-insensitive substring match).
pub fn detect_columns(headers: &[String]) -> ColumnGuess {
    let guess = ColumnGuess {
        case_id: find_column(headers, CASE_KEYWORDS),
        step: find_column(headers, STEP_KEYWORDS),
        timestamp: find_column(headers, TIMESTAMP_KEYWORDS),
        confidence: HEURISTIC_CONFIDENCE,
    };
    debug!(?guess, "column roles guessed");
    guess
}

fn find_column(headers: &[String], keywords: &[&str]) -> Option<String> {
    headers
        .iter()
        .find(|header| {
            let lower = header.to_lowercase();
            keywords.iter().any(|k| lower.contains(k))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_detects_typical_export_headers() {
        let guess = detect_columns(&headers(&["Customer", "Status", "Updated At", "Amount"]));
        assert_eq!(guess.case_id.as_deref(), Some("Customer"));
        assert_eq!(guess.step.as_deref(), Some("Status"));
        assert_eq!(guess.timestamp.as_deref(), Some("Updated At"));
        assert_eq!(guess.confidence, 0.5);
    }

    #[test]
    fn test_first_matching_header_wins() {
        // "Event ID" contains "id" and comes first
        let guess = detect_columns(&headers(&["Event ID", "Case", "Étape"]));
        assert_eq!(guess.case_id.as_deref(), Some("Event ID"));
        assert_eq!(guess.step.as_deref(), Some("Event ID"));
    }

    #[test]
    fn test_accented_keyword_matches_case_insensitively() {
        let guess = detect_columns(&headers(&["Dossier", "ÉTAPE"]));
        assert_eq!(guess.step.as_deref(), Some("ÉTAPE"));
        assert_eq!(guess.case_id, None);
        assert_eq!(guess.timestamp, None);
    }
}
