use proctwin_types::EventLog;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

/// A distinct step label with its total occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub count: usize,
}

/// Directly-follows relation between two steps of the same case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub count: usize,
}

/// Frequency-weighted transition graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessGraph {
    /// Sorted by descending count; ties keep first-seen input order
    pub nodes: Vec<Node>,
    /// First-seen order
    pub edges: Vec<Edge>,
}

pub fn build_graph(log: &EventLog) -> ProcessGraph {
    ProcessGraph {
        nodes: count_nodes(log),
        edges: count_edges(log),
    }
}

fn count_nodes(log: &EventLog) -> Vec<Node> {
    // label -> (count, first input row)
    let mut seen: HashMap<&str, (usize, usize)> = HashMap::new();
    for event in log.events() {
        let entry = seen.entry(event.step.as_str()).or_insert((0, event.row));
        entry.0 += 1;
        entry.1 = entry.1.min(event.row);
    }

    let mut counted: Vec<(&str, usize, usize)> = seen
        .into_iter()
        .map(|(label, (count, first_row))| (label, count, first_row))
        .collect();
    counted.sort_by_key(|&(_, count, first_row)| (Reverse(count), first_row));

    counted
        .into_iter()
        .map(|(label, count, _)| Node {
            id: label.to_string(),
            count,
        })
        .collect()
}

fn count_edges(log: &EventLog) -> Vec<Edge> {
    let mut edges: Vec<Edge> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for (_, events) in log.cases() {
        for pair in events.windows(2) {
            let key = (pair[0].step.as_str(), pair[1].step.as_str());
            match index.get(&key) {
                Some(&pos) => edges[pos].count += 1,
                None => {
                    index.insert(key, edges.len());
                    edges.push(Edge {
                        from: key.0.to_string(),
                        to: key.1.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    edges
}
