use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::gps_processor::Point;

pub const DEFAULT_TRIGGER_DISTANCE_M: f64 = 10.0;
pub const DEFAULT_ARM_DISTANCE_M: f64 = 20.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalThresholds {
    /// At or below this distance an armed detector reports an arrival.
    pub trigger_distance_m: f64,
    /// At or beyond this distance the detector arms.
    pub arm_distance_m: f64,
}

impl Default for ArrivalThresholds {
    fn default() -> Self {
        ArrivalThresholds {
            trigger_distance_m: DEFAULT_TRIGGER_DISTANCE_M,
            arm_distance_m: DEFAULT_ARM_DISTANCE_M,
        }
    }
}

impl ArrivalThresholds {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.trigger_distance_m.is_finite() || !self.arm_distance_m.is_finite() {
            bail!("arrival thresholds must be finite: {:?}", self);
        }
        if self.trigger_distance_m < 0.0 {
            bail!(
                "trigger distance must not be negative, got {}",
                self.trigger_distance_m
            );
        }
        if self.trigger_distance_m >= self.arm_distance_m {
            bail!(
                "trigger distance ({}) must be smaller than arm distance ({})",
                self.trigger_distance_m,
                self.arm_distance_m
            );
        }
        Ok(())
    }
}

/// Where the detector is in a departure/return cycle.
///
/// Only `Armed` can fire. `Far` and `NearPendingReset` both mean "not
/// armed" and follow the same rules; they differ only in whether anything
/// has fired since the location was marked. Firing clears the armed flag
/// and lands in `NearPendingReset`, a new mark or `reset` goes back to `Far`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ArrivalState {
    // nothing happened since the location was marked
    Far,
    // fired, waiting for the user to walk away again
    NearPendingReset,
    Armed,
}

impl ArrivalState {
    pub fn is_armed(&self) -> bool {
        *self == ArrivalState::Armed
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrivalUpdate {
    pub distance_m: f64,
    pub arrived: bool,
}

/// Decides when the user is back at the marked location.
///
/// There are two thresholds so that hovering around a single boundary does
/// not produce a stream of notifications: the user has to get at least
/// `arm_distance_m` away before getting within `trigger_distance_m` fires
/// again. Anything in between is a deadband.
pub struct ArrivalDetector {
    thresholds: ArrivalThresholds,
    state: ArrivalState,
}

impl ArrivalDetector {
    pub fn new(thresholds: ArrivalThresholds) -> anyhow::Result<Self> {
        thresholds.validate()?;
        Ok(ArrivalDetector {
            thresholds,
            state: ArrivalState::Far,
        })
    }

    pub fn thresholds(&self) -> &ArrivalThresholds {
        &self.thresholds
    }

    pub fn state(&self) -> ArrivalState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ArrivalState::Far;
    }

    pub fn on_location(&mut self, marked: &Point, current: &Point) -> ArrivalUpdate {
        self.on_distance(marked.haversine_distance(current))
    }

    // A NaN distance fails every comparison below and is a no-op.
    pub fn on_distance(&mut self, distance_m: f64) -> ArrivalUpdate {
        let mut arrived = false;
        if distance_m >= self.thresholds.arm_distance_m {
            if !self.state.is_armed() {
                debug!("armed at {:.2}m", distance_m);
            }
            self.state = ArrivalState::Armed;
        } else if distance_m <= self.thresholds.trigger_distance_m && self.state.is_armed() {
            info!("arrived, {:.2}m from the marked location", distance_m);
            self.state = ArrivalState::NearPendingReset;
            arrived = true;
        }
        ArrivalUpdate {
            distance_m,
            arrived,
        }
    }
}
