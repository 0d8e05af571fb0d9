use chrono::{DateTime, TimeDelta, Utc};
use proctwin_types::{CaseId, Event, EventLog};
use serde::Serialize;
use std::collections::BTreeMap;

/// How many entries the `slowest_*` lists carry
pub const SLOWEST_LIMIT: usize = 3;

/// Time-based KPIs, or a marker that the log has no usable timestamps
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiResult {
    pub has_timestamp: bool,
    #[serde(flatten)]
    pub timing: Option<TimingKpis>,
}

impl KpiResult {
    pub fn unavailable() -> Self {
        Self {
            has_timestamp: false,
            timing: None,
        }
    }

    pub fn available(timing: TimingKpis) -> Self {
        Self {
            has_timestamp: true,
            timing: Some(timing),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingKpis {
    pub cycle_time: CycleTime,
    pub steps_duration: Vec<StepDuration>,
    pub slowest_steps: Vec<StepDuration>,
    pub transitions_duration: Vec<TransitionDuration>,
    pub slowest_transitions: Vec<TransitionDuration>,
}

/// Cycle time aggregates across cases, `None` when no case qualifies
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleTime {
    pub avg_hours: Option<f64>,
    pub min_hours: Option<f64>,
    pub max_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepDuration {
    pub step: String,
    pub avg_hours: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionDuration {
    pub from: String,
    pub to: String,
    pub avg_hours: f64,
    pub count: usize,
}

/// First and last timestamp of one case
#[derive(Debug, Clone, PartialEq)]
pub struct CycleTimeRecord {
    pub case_id: CaseId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_hours: f64,
}

/// Gap between an event and the next timestamped event of its case
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationSample<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub hours: f64,
}

pub fn compute_kpis(log: &EventLog) -> KpiResult {
    if !log.has_timestamps() {
        return KpiResult::unavailable();
    }

    let cycle_hours: Vec<f64> = cycle_times(log)
        .iter()
        .map(|r| r.duration_hours)
        .collect();
    let cycle_time = CycleTime::from_hours(&cycle_hours);

    let samples = duration_samples(log);

    let mut by_step: BTreeMap<&str, Mean> = BTreeMap::new();
    let mut by_transition: BTreeMap<(&str, &str), Mean> = BTreeMap::new();
    for sample in &samples {
        by_step.entry(sample.from).or_default().add(sample.hours);
        by_transition
            .entry((sample.from, sample.to))
            .or_default()
            .add(sample.hours);
    }

    let steps_duration: Vec<StepDuration> = slowest_first(by_step)
        .into_iter()
        .map(|(step, mean)| StepDuration {
            step: step.to_string(),
            avg_hours: round_hours(mean.value()),
            count: mean.count,
        })
        .collect();

    let transitions_duration: Vec<TransitionDuration> = slowest_first(by_transition)
        .into_iter()
        .map(|((from, to), mean)| TransitionDuration {
            from: from.to_string(),
            to: to.to_string(),
            avg_hours: round_hours(mean.value()),
            count: mean.count,
        })
        .collect();

    KpiResult::available(TimingKpis {
        cycle_time,
        slowest_steps: prefix(&steps_duration),
        steps_duration,
        slowest_transitions: prefix(&transitions_duration),
        transitions_duration,
    })
}

/// Per-case span between the earliest and latest timestamp.
///
/// Uses min/max, so reversed timestamps inside a case still produce a
/// non-negative duration. Cases without any timestamp are absent.
pub fn cycle_times(log: &EventLog) -> Vec<CycleTimeRecord> {
    log.cases()
        .filter_map(|(case_id, events)| {
            let mut stamps = events.iter().filter_map(|e| e.timestamp);
            let first = stamps.next()?;
            let (start, end) = stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
            Some(CycleTimeRecord {
                case_id: case_id.clone(),
                start,
                end,
                duration_hours: hours(end - start),
            })
        })
        .collect()
}

/// Gaps between consecutive timestamped events of each case, in log order.
///
/// Events without a timestamp are skipped. Negative gaps (timestamps running
/// backwards) are excluded, as is the last event of each case.
pub fn duration_samples(log: &EventLog) -> Vec<DurationSample<'_>> {
    let mut samples = Vec::new();
    for (_, events) in log.cases() {
        let stamped: Vec<(&Event, DateTime<Utc>)> = events
            .iter()
            .filter_map(|e| e.timestamp.map(|t| (e, t)))
            .collect();

        for pair in stamped.windows(2) {
            let (current, at) = pair[0];
            let (next, next_at) = pair[1];
            let gap = hours(next_at - at);
            if gap >= 0.0 {
                samples.push(DurationSample {
                    from: current.step.as_str(),
                    to: next.step.as_str(),
                    hours: gap,
                });
            }
        }
    }
    samples
}

impl CycleTime {
    fn from_hours(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                avg_hours: None,
                min_hours: None,
                max_hours: None,
            };
        }

        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            avg_hours: Some(round_hours(sum / values.len() as f64)),
            min_hours: Some(round_hours(min)),
            max_hours: Some(round_hours(max)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    count: usize,
    sum: f64,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

// Stable: equal means keep key order
fn slowest_first<K>(groups: BTreeMap<K, Mean>) -> Vec<(K, Mean)> {
    let mut sorted: Vec<(K, Mean)> = groups.into_iter().collect();
    sorted.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()));
    sorted
}

fn prefix<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().take(SLOWEST_LIMIT).cloned().collect()
}

// Full precision: sub-millisecond parts of parsed timestamps count
fn hours(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 / 3_600.0 + f64::from(delta.subsec_nanos()) / 3_600_000_000_000.0
}

// Halves go to the even neighbour, so 0.125 becomes 0.12
fn round_hours(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
