use crate::api::types::SimTime;

#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    pub name: String,
    pub signal_id: u64,
    pub sim_until: SimTime,
    pub stage_index: usize,
    pub scale_factor: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            name: "signal67".to_string(),
            signal_id: 67,
            sim_until: SimTime::from_hms(12, 0, 0),
            stage_index: 1,
            scale_factor: 2.0,
        }
    }
}

impl ExperimentConfig {
    pub fn with_signal(mut self, id: u64) -> Self {
        self.signal_id = id;
        self.name = format!("signal{}", id);
        self
    }

    pub fn with_sim_until(mut self, t: SimTime) -> Self {
        self.sim_until = t;
        self
    }
}
