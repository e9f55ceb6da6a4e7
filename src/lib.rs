pub mod api;
pub mod experiment;
pub mod metrics;

pub use api::{ApiClient, ApiError, SimulationApi};
pub use experiment::{ExperimentConfig, ExperimentRunner};
pub use metrics::PhaseSummary;

pub mod prelude {
    pub use crate::api::types::{Direction, FinishedTrip, SimTime, TrafficSignal};
    pub use crate::api::{ApiClient, ApiError, SimulationApi};
    pub use crate::experiment::{ExperimentConfig, ExperimentRunner, PhaseRaw};
    pub use crate::metrics::{ComparisonReport, PhaseSummary};
}
