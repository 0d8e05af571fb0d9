use proctwin_engine::kpi::duration_samples;
use proctwin_engine::{analyze, build_graph, normalize};
use proctwin_types::{Event, EventLog, Table};

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    let mut table = Table::new(columns.iter().copied());
    for row in rows {
        table.push_row(row.iter().copied()).expect("row width");
    }
    table
}

fn approval_log() -> Table {
    table(
        &["case_id", "step", "timestamp"],
        &[
            &["1", "submit", "2024-05-01 00:00:00"],
            &["1", "review", "2024-05-01 02:00:00"],
            &["1", "approve", "2024-05-01 05:00:00"],
            &["2", "submit", "2024-05-01 00:00:00"],
            &["2", "review", "2024-05-01 01:00:00"],
        ],
    )
}

#[test]
fn test_end_to_end_approval_flow() {
    let result = analyze(&approval_log()).expect("analysis");

    assert_eq!(result.stats.num_cases, 2);
    assert_eq!(result.stats.num_events, 5);
    assert_eq!(result.stats.num_steps, 3);
    assert_eq!(result.stats.num_transitions, 2);

    let nodes: Vec<(&str, usize)> = result
        .graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.count))
        .collect();
    assert_eq!(nodes, vec![("submit", 2), ("review", 2), ("approve", 1)]);

    let edges: Vec<(&str, &str, usize)> = result
        .graph
        .edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str(), e.count))
        .collect();
    assert_eq!(edges, vec![("submit", "review", 2), ("review", "approve", 1)]);

    let timing = result.kpi.timing.as_ref().expect("timestamps present");
    assert_eq!(timing.cycle_time.avg_hours, Some(3.0));
    assert_eq!(timing.cycle_time.min_hours, Some(1.0));
    assert_eq!(timing.cycle_time.max_hours, Some(5.0));

    let slowest: Vec<(&str, f64, usize)> = timing
        .slowest_steps
        .iter()
        .map(|s| (s.step.as_str(), s.avg_hours, s.count))
        .collect();
    assert_eq!(slowest, vec![("review", 2.0, 2), ("submit", 1.5, 2)]);

    assert_eq!(timing.slowest_transitions[0].from, "review");
    assert_eq!(timing.slowest_transitions[0].to, "approve");
    assert_eq!(timing.slowest_transitions[0].avg_hours, 3.0);
}

#[test]
fn test_result_serializes_to_contract_shape() {
    let result = analyze(&approval_log()).expect("analysis");
    let json = serde_json::to_value(&result).expect("serialize");

    assert_eq!(json["graph"]["edges"][0]["from"], "submit");
    assert_eq!(json["kpi"]["has_timestamp"], true);
    assert_eq!(json["kpi"]["cycle_time"]["avg_hours"], 3.0);
    assert_eq!(json["kpi"]["steps_duration"][0]["step"], "review");
    assert_eq!(json["kpi"]["transitions_duration"][0]["to"], "approve");
    assert!(json["kpi"]["slowest_transitions"].is_array());
}

#[test]
fn test_analysis_is_deterministic() {
    let first = analyze(&approval_log()).expect("analysis");
    let second = analyze(&approval_log()).expect("analysis");
    assert_eq!(first, second);
}

#[test]
fn test_node_counts_sum_to_events() {
    let t = table(
        &["case_id", "step"],
        &[
            &["a", "x"],
            &["b", "y"],
            &["a", "y"],
            &["c", "x"],
            &["a", "x"],
            &["b", "z"],
        ],
    );
    let result = analyze(&t).expect("analysis");
    let total: usize = result.graph.nodes.iter().map(|n| n.count).sum();
    assert_eq!(total, result.stats.num_events);
}

#[test]
fn test_case_contributes_at_most_k_minus_one_edges() {
    let t = table(
        &["case_id", "step"],
        &[&["1", "a"], &["1", "b"], &["1", "c"], &["1", "d"], &["2", "solo"]],
    );
    let graph = build_graph(&normalize(&t).expect("normalize"));
    let observations: usize = graph.edges.iter().map(|e| e.count).sum();
    assert_eq!(observations, 3);
}

#[test]
fn test_case_ids_compare_by_their_exact_text() {
    let t = table(
        &["case_id", "step"],
        &[&["01", "a"], &["1", "b"], &["A", "c"]],
    );
    let result = analyze(&t).expect("analysis");
    assert_eq!(result.stats.num_cases, 3);
    assert_eq!(result.stats.num_events, 3);
    assert!(result.graph.edges.is_empty());
}

#[test]
fn test_seven_and_a_half_minute_gap_rounds_to_even() {
    let t = table(
        &["case_id", "step", "timestamp"],
        &[
            &["1", "pick", "2024-05-01 00:00:00"],
            &["1", "pack", "2024-05-01 00:07:30"],
        ],
    );
    let result = analyze(&t).expect("analysis");
    let timing = result.kpi.timing.as_ref().expect("timestamps present");
    assert_eq!(timing.steps_duration[0].avg_hours, 0.12);
    assert_eq!(timing.cycle_time.avg_hours, Some(0.12));
}

#[test]
fn test_missing_timestamp_column_degrades_kpis() {
    let t = table(&["case_id", "step"], &[&["1", "a"], &["1", "b"]]);
    let result = analyze(&t).expect("analysis");
    assert!(!result.kpi.has_timestamp);
    assert_eq!(
        serde_json::to_value(&result.kpi).expect("serialize"),
        serde_json::json!({ "has_timestamp": false })
    );
}

#[test]
fn test_all_unparsable_timestamps_degrade_kpis() {
    let t = table(
        &["case_id", "step", "timestamp"],
        &[&["1", "a", "soon"], &["1", "b", "later"]],
    );
    let result = analyze(&t).expect("analysis");
    assert!(!result.kpi.has_timestamp);
    assert_eq!(result.stats.num_events, 2);
    assert_eq!(result.stats.num_transitions, 1);
}

#[test]
fn test_rows_without_timestamp_count_in_graph_only() {
    let t = table(
        &["case_id", "step", "timestamp"],
        &[
            &["1", "open", "2024-05-01 00:00:00"],
            &["1", "note", ""],
            &["1", "close", "2024-05-01 04:00:00"],
        ],
    );
    let result = analyze(&t).expect("analysis");
    assert_eq!(result.stats.num_events, 3);
    // Untimed rows sort to the end of their case
    let edges: Vec<(&str, &str)> = result
        .graph
        .edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect();
    assert_eq!(edges, vec![("open", "close"), ("close", "note")]);

    let timing = result.kpi.timing.as_ref().expect("timestamps present");
    assert_eq!(timing.steps_duration.len(), 1);
    assert_eq!(timing.steps_duration[0].step, "open");
    assert_eq!(timing.steps_duration[0].avg_hours, 4.0);
}

#[test]
fn test_backwards_time_excluded_from_durations() {
    let log = EventLog::from_events(vec![
        Event::new(7, "ship", proctwin_engine::timestamp::parse_timestamp("2024-05-01 10:00:00"), 0),
        Event::new(7, "pack", proctwin_engine::timestamp::parse_timestamp("2024-05-01 09:00:00"), 1),
    ]);
    assert!(duration_samples(&log).is_empty());

    let kpi = proctwin_engine::compute_kpis(&log);
    let timing = kpi.timing.expect("timestamps present");
    assert_eq!(timing.cycle_time.max_hours, Some(1.0));
    assert!(timing.transitions_duration.is_empty());
}

#[test]
fn test_missing_step_column_is_rejected() {
    let t = table(&["case_id", "activity"], &[&["1", "a"]]);
    let err = analyze(&t).expect_err("schema error");
    assert!(err.is_schema());
    assert!(err.to_string().contains("step"));
}
