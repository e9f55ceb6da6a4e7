pub mod logger;
pub mod report;

use crate::api::types::{Direction, FinishedTrip};
use crate::experiment::PhaseRaw;
use serde::Serialize;
use std::collections::BTreeMap;

// The join key shared by the delay and throughput maps of both phases. One
// formatting function, so baseline and treatment rows always line up.
pub fn direction_label(direction: &Direction) -> Option<String> {
    if direction.crosswalk {
        return None;
    }
    Some(format!(
        "Road #{} ({}) -> Road #{} ({})",
        direction.from.id, direction.from.dir, direction.to.id, direction.to.dir
    ))
}

// Trip id to duration in seconds. Cancelled trips carry no duration and are
// dropped here.
pub fn trip_durations(trips: &[FinishedTrip]) -> BTreeMap<u64, f64> {
    trips
        .iter()
        .filter_map(|trip| trip.duration.map(|duration| (trip.id, duration)))
        .collect()
}

// Mean delay per vehicular direction, one decimal. Crosswalks and directions
// with no recorded events are omitted.
pub fn mean_delay_per_direction(delays: &[(Direction, Vec<f64>)]) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (direction, samples) in delays {
        let Some(label) = direction_label(direction) else {
            continue;
        };
        if samples.is_empty() {
            continue;
        }
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        out.insert(label, format!("{:.1}", mean));
    }
    out
}

// Cumulative count per vehicular direction. Unlike delays, zero counts stay
// in; only crosswalk entries are dropped.
pub fn throughput_per_direction(thruput: &[(Direction, u64)]) -> BTreeMap<String, u64> {
    thruput
        .iter()
        .filter_map(|(direction, count)| direction_label(direction).map(|label| (label, *count)))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseSummary {
    pub trips: BTreeMap<u64, f64>,
    pub delays: BTreeMap<String, String>,
    pub thruput: BTreeMap<String, u64>,
}

impl PhaseSummary {
    pub fn from_raw(raw: &PhaseRaw) -> Self {
        Self {
            trips: trip_durations(&raw.trips),
            delays: mean_delay_per_direction(&raw.delays),
            thruput: throughput_per_direction(&raw.thruput),
        }
    }

    pub fn finished_trips(&self) -> usize {
        self.trips.len()
    }

    pub fn total_duration(&self) -> f64 {
        self.trips.values().sum()
    }
}

// Positive when more trips finished after the edits.
pub fn trips_finished_delta(baseline: &PhaseSummary, treatment: &PhaseSummary) -> i64 {
    treatment.finished_trips() as i64 - baseline.finished_trips() as i64
}

// Positive when the treatment run was faster over all trips.
pub fn total_time_saved(baseline: &PhaseSummary, treatment: &PhaseSummary) -> f64 {
    baseline.total_duration() - treatment.total_duration()
}

// What gets persisted when a run asks for a JSON record of the comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub signal_id: u64,
    pub sim_until: String,
    pub trips_finished_delta: i64,
    pub total_time_saved: f64,
    pub baseline: PhaseSummary,
    pub treatment: PhaseSummary,
}

impl ComparisonReport {
    pub fn new(
        signal_id: u64,
        sim_until: String,
        baseline: PhaseSummary,
        treatment: PhaseSummary,
    ) -> Self {
        Self {
            signal_id,
            sim_until,
            trips_finished_delta: trips_finished_delta(&baseline, &treatment),
            total_time_saved: total_time_saved(&baseline, &treatment),
            baseline,
            treatment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::DirectedRoad;

    fn direction(crosswalk: bool, from: u64, to: u64) -> Direction {
        Direction {
            crosswalk,
            from: DirectedRoad {
                id: from,
                dir: "N".to_string(),
            },
            to: DirectedRoad {
                id: to,
                dir: "S".to_string(),
            },
        }
    }

    #[test]
    fn trip_durations_keeps_exact_values_and_drops_cancelled() {
        let trips = vec![
            FinishedTrip {
                id: 1,
                duration: Some(30.0),
            },
            FinishedTrip {
                id: 2,
                duration: None,
            },
            FinishedTrip {
                id: 3,
                duration: Some(45.5),
            },
        ];

        let durations = trip_durations(&trips);
        assert_eq!(durations.len(), 2);
        assert_eq!(durations[&1], 30.0);
        assert_eq!(durations[&3], 45.5);
        assert!(!durations.contains_key(&2));
    }

    #[test]
    fn direction_label_formats_vehicular_and_rejects_crosswalks() {
        assert_eq!(
            direction_label(&direction(false, 12, 7)).unwrap(),
            "Road #12 (N) -> Road #7 (S)"
        );
        assert_eq!(direction_label(&direction(true, 12, 7)), None);
    }

    #[test]
    fn mean_delay_averages_to_one_decimal() {
        let delays = vec![(direction(false, 12, 7), vec![10.0, 20.0, 30.0])];
        let means = mean_delay_per_direction(&delays);
        assert_eq!(means["Road #12 (N) -> Road #7 (S)"], "20.0");
    }

    #[test]
    fn crosswalks_never_reach_the_delay_map() {
        let delays = vec![
            (direction(true, 1, 2), vec![10.0, 20.0]),
            (direction(false, 3, 4), vec![5.0]),
        ];
        let means = mean_delay_per_direction(&delays);
        assert_eq!(means.len(), 1);
        assert!(means.contains_key("Road #3 (N) -> Road #4 (S)"));
    }

    #[test]
    fn empty_sample_directions_are_absent_from_the_delay_map() {
        let delays = vec![(direction(false, 12, 7), Vec::new())];
        assert!(mean_delay_per_direction(&delays).is_empty());
    }

    #[test]
    fn throughput_drops_crosswalks_but_keeps_zero_counts() {
        let thruput = vec![
            (direction(true, 1, 2), 99),
            (direction(false, 3, 4), 0),
            (direction(false, 5, 6), 40),
        ];

        let counts = throughput_per_direction(&thruput);
        assert_eq!(counts.len(), 2);
        // No non-empty filter on this side, unlike delays.
        assert_eq!(counts["Road #3 (N) -> Road #4 (S)"], 0);
        assert_eq!(counts["Road #5 (N) -> Road #6 (S)"], 40);
    }

    #[test]
    fn deltas_match_the_worked_example() {
        let baseline = PhaseSummary {
            trips: [(1, 30.0), (2, 45.0)].into_iter().collect(),
            delays: BTreeMap::new(),
            thruput: BTreeMap::new(),
        };
        let treatment = PhaseSummary {
            trips: [(1, 20.0), (2, 50.0), (3, 10.0)].into_iter().collect(),
            delays: BTreeMap::new(),
            thruput: BTreeMap::new(),
        };

        assert_eq!(trips_finished_delta(&baseline, &treatment), 1);
        assert_eq!(total_time_saved(&baseline, &treatment), -5.0);
    }
}
