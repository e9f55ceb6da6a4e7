pub mod config;
pub use config::ExperimentConfig;

use crate::api::types::{Direction, FinishedTrip, SimTime, TrafficSignal};
use crate::api::SimulationApi;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info};

// Raw payloads of one phase, exactly as the server handed them out.
#[derive(Debug, Clone)]
pub struct PhaseRaw {
    pub trips: Vec<FinishedTrip>,
    pub delays: Vec<(Direction, Vec<f64>)>,
    pub thruput: Vec<(Direction, u64)>,
}

pub struct ExperimentRunner<C: SimulationApi> {
    client: C,
    config: ExperimentConfig,
}

impl<C: SimulationApi> ExperimentRunner<C> {
    pub fn new(client: C, config: ExperimentConfig) -> Self {
        Self { client, config }
    }

    // The two-phase protocol. Step order is load-bearing: a reset wipes both
    // simulated time and any applied signal edit, so the signal is fetched
    // before the second reset and the edit is applied after it.
    pub async fn run<F>(&self, mutate: F) -> Result<(PhaseRaw, PhaseRaw)>
    where
        F: FnOnce(TrafficSignal) -> Result<TrafficSignal>,
    {
        info!("Starting experiment: {}", self.config.name);
        info!(
            "Signal: {}, simulating until {}",
            self.config.signal_id, self.config.sim_until
        );

        let ack = self.client.reset().await?;
        debug!("Reset: {}", ack);

        info!("Simulating before any edits");
        self.advance().await?;
        let baseline = self.collect_phase().await?;

        let signal = self.client.get_traffic_signal(self.config.signal_id).await?;
        let edited = mutate(signal)?;

        let ack = self.client.reset().await?;
        debug!("Reset: {}", ack);
        let ack = self.client.set_traffic_signal(&edited).await?;
        info!("Updated signal {}: {}", self.config.signal_id, ack);

        info!("Simulating after the edits");
        self.advance().await?;
        let treatment = self.collect_phase().await?;

        Ok((baseline, treatment))
    }

    async fn advance(&self) -> Result<()> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        pb.set_message(format!("Simulating until {}", self.config.sim_until));
        pb.enable_steady_tick(Duration::from_millis(100));

        let ack = self.client.goto_time(self.config.sim_until).await?;

        pb.finish_with_message(ack);
        Ok(())
    }

    async fn collect_phase(&self) -> Result<PhaseRaw> {
        let trips = self.client.get_finished_trips().await?;
        let delays = self
            .client
            .get_delays(self.config.signal_id, SimTime::MIDNIGHT, self.config.sim_until)
            .await?;
        let thruput = self
            .client
            .get_cumulative_thruput(self.config.signal_id)
            .await?;

        debug!(
            "Collected {} trips, {} delay directions, {} thruput directions",
            trips.len(),
            delays.len(),
            thruput.len()
        );

        Ok(PhaseRaw {
            trips,
            delays,
            thruput,
        })
    }
}
