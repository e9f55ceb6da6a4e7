pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{Direction, FinishedTrip, SimTime, TrafficSignal};

use types::AgentSnapshot;

// The seam between the experiment protocol and the remote simulation. The
// runner is written against this trait so tests can drive it with an
// in-memory fake instead of a live server.
#[allow(async_fn_in_trait)]
pub trait SimulationApi {
    async fn get_time(&self) -> Result<String, ApiError>;
    async fn reset(&self) -> Result<String, ApiError>;
    async fn goto_time(&self, t: SimTime) -> Result<String, ApiError>;
    async fn get_finished_trips(&self) -> Result<Vec<FinishedTrip>, ApiError>;
    async fn get_agent_positions(&self) -> Result<Vec<AgentSnapshot>, ApiError>;
    async fn get_traffic_signal(&self, id: u64) -> Result<TrafficSignal, ApiError>;
    async fn set_traffic_signal(&self, signal: &TrafficSignal) -> Result<String, ApiError>;
    async fn get_delays(
        &self,
        id: u64,
        t1: SimTime,
        t2: SimTime,
    ) -> Result<Vec<(Direction, Vec<f64>)>, ApiError>;
    async fn get_cumulative_thruput(&self, id: u64) -> Result<Vec<(Direction, u64)>, ApiError>;
}
