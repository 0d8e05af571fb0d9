use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one process instance (order, ticket, ...)
///
/// Identifiers written as a plain integer compare numerically so that `2`
/// sorts before `10`; everything else compares as text and sorts after all
/// numbers. Only the canonical spelling counts as a number, so `01`, `+1` and
/// `1` stay three distinct cases.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaseId {
    Number(i64),
    Label(String),
}

impl CaseId {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => CaseId::Number(n),
            _ => CaseId::Label(raw.to_string()),
        }
    }
}

impl From<&str> for CaseId {
    fn from(raw: &str) -> Self {
        CaseId::parse(raw)
    }
}

impl From<i64> for CaseId {
    fn from(n: i64) -> Self {
        CaseId::Number(n)
    }
}

impl From<i32> for CaseId {
    fn from(n: i32) -> Self {
        CaseId::Number(n.into())
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseId::Number(n) => write!(f, "{}", n),
            CaseId::Label(s) => write!(f, "{}", s),
        }
    }
}

/// One occurrence of a process step within a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub case_id: CaseId,
    pub step: String,
    /// Missing when the log has no timestamp column or the cell did not parse
    pub timestamp: Option<DateTime<Utc>>,
    /// Position of the source row in the input table
    pub row: usize,
}

impl Event {
    pub fn new(
        case_id: impl Into<CaseId>,
        step: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        row: usize,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            step: step.into(),
            timestamp,
            row,
        }
    }
}

/// Events partitioned by case.
///
/// Cases are stored contiguously in ascending `case_id` order; the order of
/// events inside a case is whatever the builder established and is never
/// changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventLog {
    events: Vec<Event>,
    has_timestamps: bool,
}

impl EventLog {
    /// Group events by case, keeping the given order inside each case
    pub fn from_events(mut events: Vec<Event>) -> Self {
        // sort_by is stable: intra-case order survives
        events.sort_by(|a, b| a.case_id.cmp(&b.case_id));
        let has_timestamps = events.iter().any(|e| e.timestamp.is_some());
        Self {
            events,
            has_timestamps,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// True when at least one event carries a usable timestamp
    pub fn has_timestamps(&self) -> bool {
        self.has_timestamps
    }

    /// Iterate cases in `case_id` order with their ordered events
    pub fn cases(&self) -> Cases<'_> {
        Cases {
            rest: &self.events,
        }
    }

    pub fn num_cases(&self) -> usize {
        self.cases().count()
    }
}

/// Iterator over `(case_id, events)` runs of an [`EventLog`]
pub struct Cases<'a> {
    rest: &'a [Event],
}

impl<'a> Iterator for Cases<'a> {
    type Item = (&'a CaseId, &'a [Event]);

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.first()?;
        let len = self
            .rest
            .iter()
            .take_while(|e| e.case_id == first.case_id)
            .count();
        let (case, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some((&first.case_id, case))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_case_id_orders_numbers_numerically() {
        let mut ids = vec![
            CaseId::parse("10"),
            CaseId::parse("b"),
            CaseId::parse("2"),
            CaseId::parse("a"),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                CaseId::Number(2),
                CaseId::Number(10),
                CaseId::Label("a".to_string()),
                CaseId::Label("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_canonical_integers_stay_labels() {
        assert_eq!(CaseId::parse(" 42 "), CaseId::Number(42));
        assert_eq!(CaseId::parse("-3"), CaseId::Number(-3));
        assert_eq!(CaseId::parse("01"), CaseId::Label("01".to_string()));
        assert_eq!(CaseId::parse("+1"), CaseId::Label("+1".to_string()));
        assert_eq!(CaseId::parse("-0"), CaseId::Label("-0".to_string()));
        assert_ne!(CaseId::parse("007"), CaseId::parse("7"));
    }

    #[test]
    fn test_case_id_serializes_untagged() {
        let json = serde_json::to_string(&vec![CaseId::from(7), CaseId::from("A-1")]).unwrap();
        assert_eq!(json, r#"[7,"A-1"]"#);
    }

    #[test]
    fn test_from_events_groups_cases_and_keeps_inner_order() {
        let log = EventLog::from_events(vec![
            Event::new(2, "b", None, 0),
            Event::new(1, "x", None, 1),
            Event::new(2, "a", None, 2),
            Event::new(1, "y", None, 3),
        ]);

        let cases: Vec<(String, Vec<&str>)> = log
            .cases()
            .map(|(id, events)| {
                (
                    id.to_string(),
                    events.iter().map(|e| e.step.as_str()).collect(),
                )
            })
            .collect();

        assert_eq!(
            cases,
            vec![
                ("1".to_string(), vec!["x", "y"]),
                ("2".to_string(), vec!["b", "a"]),
            ]
        );
        assert_eq!(log.num_cases(), 2);
        assert!(!log.has_timestamps());
    }

    #[test]
    fn test_has_timestamps_detects_any_value() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let log = EventLog::from_events(vec![
            Event::new(1, "a", None, 0),
            Event::new(1, "b", Some(ts), 1),
        ]);
        assert!(log.has_timestamps());
    }

    #[test]
    fn test_empty_log_has_no_cases() {
        let log = EventLog::default();
        assert!(log.is_empty());
        assert_eq!(log.cases().count(), 0);
    }
}
