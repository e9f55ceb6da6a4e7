use super::{total_time_saved, trips_finished_delta, PhaseSummary};
use serde::Serialize;
use std::fmt::Write;

// One comparison line, also the record shape the CSV logger writes. Counts
// are strings so a direction missing from a map renders as "-" instead of
// killing a report for an experiment that already ran to completion.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub direction: String,
    pub delay_before: String,
    pub delay_after: String,
    pub thruput_before: String,
    pub thruput_after: String,
}

// Row selection follows the baseline delay map; directions that only show up
// in the treatment run get no row.
pub fn comparison_rows(baseline: &PhaseSummary, treatment: &PhaseSummary) -> Vec<ComparisonRow> {
    let lookup = |map: &std::collections::BTreeMap<String, u64>, label: &str| {
        map.get(label)
            .map(|count| count.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    baseline
        .delays
        .iter()
        .map(|(label, before)| ComparisonRow {
            direction: label.clone(),
            delay_before: before.clone(),
            delay_after: treatment
                .delays
                .get(label)
                .cloned()
                .unwrap_or_else(|| "-".to_string()),
            thruput_before: lookup(&baseline.thruput, label),
            thruput_after: lookup(&treatment.thruput, label),
        })
        .collect()
}

pub fn render(baseline: &PhaseSummary, treatment: &PhaseSummary) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "Baseline: {} finished trips, total of {} seconds",
        baseline.finished_trips(),
        baseline.total_duration()
    )
    .unwrap();
    writeln!(
        out,
        "Experiment: {} finished trips, total of {} seconds",
        treatment.finished_trips(),
        treatment.total_duration()
    )
    .unwrap();
    writeln!(out).unwrap();

    writeln!(
        out,
        "{} more trips finished after the edits (higher is better)",
        trips_finished_delta(baseline, treatment)
    )
    .unwrap();
    writeln!(
        out,
        "Experiment was {} seconds faster, over all trips",
        total_time_saved(baseline, treatment)
    )
    .unwrap();
    writeln!(out).unwrap();

    writeln!(
        out,
        "{:<40} {:>20} {:>20} {:>17} {:>17}",
        "Direction", "avg delay before", "avg delay after", "thruput before", "thruput after"
    )
    .unwrap();
    for row in comparison_rows(baseline, treatment) {
        writeln!(
            out,
            "{:<40} {:>20} {:>20} {:>17} {:>17}",
            row.direction, row.delay_before, row.delay_after, row.thruput_before, row.thruput_after
        )
        .unwrap();
    }

    out
}
