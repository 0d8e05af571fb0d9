use crate::timestamp::parse_timestamp;
use proctwin_types::{
    CASE_ID_COLUMN, CaseId, Event, EventLog, STEP_COLUMN, TIMESTAMP_COLUMN, Table,
};
use std::cmp::Ordering;
use tracing::debug;

/// Validate a table and turn it into an ordered event log.
///
/// Rows are sorted by `(case_id, timestamp)` when at least one timestamp
/// parses, otherwise by `case_id` alone. The sort is stable, so equal keys
/// keep their input order; rows without a usable timestamp go after the
/// timestamped rows of their case. Rows with a blank case or step are skipped.
pub fn normalize(table: &Table) -> proctwin_types::Result<EventLog> {
    let [case_col, step_col] = table.require_columns([CASE_ID_COLUMN, STEP_COLUMN])?;
    let ts_col = table.column_index(TIMESTAMP_COLUMN);

    let mut events = Vec::with_capacity(table.len());
    let mut skipped = 0usize;
    let mut unparsed = 0usize;

    for row in 0..table.len() {
        let (Some(case), Some(step)) = (table.cell(row, case_col), table.cell(row, step_col))
        else {
            skipped += 1;
            continue;
        };

        let raw_ts = ts_col.and_then(|col| table.cell(row, col));
        let timestamp = raw_ts.and_then(parse_timestamp);
        if raw_ts.is_some() && timestamp.is_none() {
            unparsed += 1;
        }

        events.push(Event {
            case_id: CaseId::parse(case),
            step: step.to_string(),
            timestamp,
            row,
        });
    }

    if skipped > 0 {
        debug!(skipped, "dropped rows with a blank case_id or step");
    }
    if unparsed > 0 {
        debug!(unparsed, "timestamp values could not be parsed and are treated as missing");
    }

    if events.iter().any(|e| e.timestamp.is_some()) {
        events.sort_by(|a, b| {
            a.case_id
                .cmp(&b.case_id)
                .then_with(|| missing_last(a, b))
        });
    } else {
        if ts_col.is_some() {
            debug!("no usable timestamp in the log, ordering by case only");
        }
        events.sort_by(|a, b| a.case_id.cmp(&b.case_id));
    }

    Ok(EventLog::from_events(events))
}

fn missing_last(a: &Event, b: &Event) -> Ordering {
    match (a.timestamp, b.timestamp) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
