use super::error::ApiError;
use super::types::{
    AgentPayload, AgentSnapshot, DelayPayload, Direction, FinishedTrip, SimTime, ThruputPayload,
    TrafficSignal,
};
use super::SimulationApi;
use serde::de::DeserializeOwned;
use tracing::debug;

// One method per endpoint of the headless simulation server, nothing else.
// The harness is the sole client, so there is no connection pooling to tune
// and no retry logic to get wrong.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        debug!("GET {}{} {:?}", self.base, path, query);
        let response = self
            .http
            .get(format!("{}{}", self.base, path))
            .query(query)
            .send()
            .await
            .map_err(ApiError::Network)?;
        read_body(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let body = self.get_text(path, query).await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Shape(format!("{}: {}", path, err)))
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(ApiError::Network)?;
    if !status.is_success() {
        return Err(ApiError::Server { status, body });
    }
    Ok(body)
}

impl SimulationApi for ApiClient {
    async fn get_time(&self) -> Result<String, ApiError> {
        self.get_text("/sim/get-time", &[]).await
    }

    // Clears simulated time back to zero and discards any applied edits.
    async fn reset(&self) -> Result<String, ApiError> {
        self.get_text("/sim/reset", &[]).await
    }

    // Only ever called with a target at or past the current sim time; the
    // server's behavior when rewinding is undefined.
    async fn goto_time(&self, t: SimTime) -> Result<String, ApiError> {
        self.get_text("/sim/goto-time", &[("t", t.to_string())]).await
    }

    async fn get_finished_trips(&self) -> Result<Vec<FinishedTrip>, ApiError> {
        self.get_json("/data/get-finished-trips", &[]).await
    }

    async fn get_agent_positions(&self) -> Result<Vec<AgentSnapshot>, ApiError> {
        let payload: AgentPayload = self.get_json("/data/get-agent-positions", &[]).await?;
        Ok(payload.agents)
    }

    async fn get_traffic_signal(&self, id: u64) -> Result<TrafficSignal, ApiError> {
        self.get_json("/traffic-signals/get", &[("id", id.to_string())])
            .await
    }

    // The edit persists until the next reset.
    async fn set_traffic_signal(&self, signal: &TrafficSignal) -> Result<String, ApiError> {
        debug!("POST {}/traffic-signals/set id={}", self.base, signal.id);
        let response = self
            .http
            .post(format!("{}/traffic-signals/set", self.base))
            .json(signal)
            .send()
            .await
            .map_err(ApiError::Network)?;
        read_body(response).await
    }

    async fn get_delays(
        &self,
        id: u64,
        t1: SimTime,
        t2: SimTime,
    ) -> Result<Vec<(Direction, Vec<f64>)>, ApiError> {
        let payload: DelayPayload = self
            .get_json(
                "/traffic-signals/get-delays",
                &[
                    ("id", id.to_string()),
                    ("t1", t1.to_string()),
                    ("t2", t2.to_string()),
                ],
            )
            .await?;
        Ok(payload.per_direction)
    }

    async fn get_cumulative_thruput(&self, id: u64) -> Result<Vec<(Direction, u64)>, ApiError> {
        let payload: ThruputPayload = self
            .get_json(
                "/traffic-signals/get-cumulative-thruput",
                &[("id", id.to_string())],
            )
            .await?;
        Ok(payload.per_direction)
    }
}
