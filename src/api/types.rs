use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// The headless server speaks "HH:MM:SS" strings for every time parameter,
// so keep the canonical unit as whole seconds since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimTime(u32);

impl SimTime {
    pub const MIDNIGHT: SimTime = SimTime(0);

    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self(hours * 3600 + minutes * 60 + seconds)
    }

    pub fn seconds(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0 / 3600,
            (self.0 % 3600) / 60,
            self.0 % 60
        )
    }
}

impl FromStr for SimTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(format!("expected HH:MM:SS, got '{}'", s));
        }
        let field = |i: usize, max: u32| -> Result<u32, String> {
            let v: u32 = parts[i]
                .parse()
                .map_err(|_| format!("expected HH:MM:SS, got '{}'", s))?;
            if v > max {
                return Err(format!("field {} out of range in '{}'", i, s));
            }
            Ok(v)
        };
        Ok(SimTime::from_hms(field(0, 23)?, field(1, 59)?, field(2, 59)?))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinishedTrip {
    pub id: u64,
    // None means the trip was cancelled
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectedRoad {
    pub id: u64,
    pub dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub crosswalk: bool,
    pub from: DirectedRoad,
    pub to: DirectedRoad,
}

// Wire envelopes for the two per-direction queries. Both serialize pairs as
// two-element JSON arrays, which serde maps onto tuples.
#[derive(Debug, Deserialize)]
pub struct DelayPayload {
    pub per_direction: Vec<(Direction, Vec<f64>)>,
}

#[derive(Debug, Deserialize)]
pub struct ThruputPayload {
    pub per_direction: Vec<(Direction, u64)>,
}

#[derive(Debug, Deserialize)]
pub struct AgentPayload {
    pub agents: Vec<AgentSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSnapshot {
    pub pos: LonLat,
    // None means the agent is a pedestrian
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

// A fetched signal must round-trip through POST /traffic-signals/set intact,
// so every field the harness does not interpret is kept in a flattened map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSignal {
    pub id: u64,
    pub stages: Vec<Stage>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub stage_type: StageType,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

// Durations are plain seconds on the wire, e.g. {"Fixed": 30.0}.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StageType {
    Fixed(f64),
    Variable(f64, f64, f64),
}

impl TrafficSignal {
    // The reference experiment's edit: scale one fixed-duration stage.
    pub fn scale_fixed_stage(mut self, stage: usize, factor: f64) -> anyhow::Result<TrafficSignal> {
        let id = self.id;
        let num_stages = self.stages.len();
        let target = self.stages.get_mut(stage).ok_or_else(|| {
            anyhow::anyhow!("signal {} has {} stages, no stage {}", id, num_stages, stage)
        })?;

        match &mut target.stage_type {
            StageType::Fixed(duration) => {
                *duration *= factor;
                Ok(self)
            }
            other => anyhow::bail!(
                "stage {} of signal {} is not fixed-duration: {:?}",
                stage,
                id,
                other
            ),
        }
    }
}
