use crate::detect::ColumnGuess;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use proctwin_engine::{AnalysisResult, KpiResult};

fn heading(title: &str) -> String {
    if std::io::stdout().is_terminal() {
        title.bold().cyan().to_string()
    } else {
        title.to_string()
    }
}

pub fn print_analysis(result: &AnalysisResult) {
    let stats = &result.stats;
    println!("{}", heading("Process summary"));
    println!("  Cases:       {}", stats.num_cases);
    println!("  Events:      {}", stats.num_events);
    println!("  Steps:       {}", stats.num_steps);
    println!("  Transitions: {}", stats.num_transitions);
    println!();

    println!("{}", heading("Steps by frequency"));
    for node in &result.graph.nodes {
        println!("  {:<30} {}", node.id, node.count);
    }
    println!();

    println!("{}", heading("Transitions"));
    if result.graph.edges.is_empty() {
        println!("  (none)");
    }
    for edge in &result.graph.edges {
        println!("  {} -> {}: {}", edge.from, edge.to, edge.count);
    }
    println!();

    print_kpis(&result.kpi);
}

fn print_kpis(kpi: &KpiResult) {
    let Some(timing) = &kpi.timing else {
        println!("No usable timestamps: time KPIs unavailable");
        return;
    };

    println!("{}", heading("Cycle time (hours)"));
    let cycle = &timing.cycle_time;
    println!(
        "  avg {}  min {}  max {}",
        hours(cycle.avg_hours),
        hours(cycle.min_hours),
        hours(cycle.max_hours)
    );
    println!();

    println!("{}", heading("Slowest steps"));
    if timing.slowest_steps.is_empty() {
        println!("  (no measurable gaps)");
    }
    for step in &timing.slowest_steps {
        println!(
            "  {:<30} {:.2}h avg over {}",
            step.step, step.avg_hours, step.count
        );
    }
    println!();

    println!("{}", heading("Slowest transitions"));
    if timing.slowest_transitions.is_empty() {
        println!("  (no measurable gaps)");
    }
    for transition in &timing.slowest_transitions {
        println!(
            "  {} -> {}: {:.2}h avg over {}",
            transition.from, transition.to, transition.avg_hours, transition.count
        );
    }
}

fn hours(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_report(report: &str) {
    println!();
    println!("{}", heading("Report"));
    println!("{}", report);
}

pub fn print_detection(file: &str, columns: &[String], guess: &ColumnGuess) {
    println!("{}", heading("Columns"));
    for column in columns {
        println!("  {}", column);
    }
    println!();

    println!("{}", heading("Guessed roles"));
    println!("  case_id:   {}", guess.case_id.as_deref().unwrap_or("-"));
    println!("  step:      {}", guess.step.as_deref().unwrap_or("-"));
    println!("  timestamp: {}", guess.timestamp.as_deref().unwrap_or("-"));
    println!("  confidence: {}", guess.confidence);

    if let (Some(case), Some(step)) = (&guess.case_id, &guess.step) {
        println!();
        let ts = guess
            .timestamp
            .as_ref()
            .map(|t| format!(" --ts-col {:?}", t))
            .unwrap_or_default();
        println!(
            "Try: proctwin analyze {} --case-col {:?} --step-col {:?}{}",
            file, case, step, ts
        );
    }
}
