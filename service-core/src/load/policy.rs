/// Rate above which the service is considered overloaded, in requests per
/// second.
pub const CRITICAL_LOAD_THRESHOLD: f64 = 60.0;

/// Classification of an observed request rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    Normal,
    Critical,
}

/// Stateless threshold check for instantaneous request rates.
///
/// Strict comparison: a rate exactly at the threshold is Normal. There is no
/// hysteresis; consecutive critical windows each classify as Critical.
#[derive(Debug, Clone, Copy)]
pub struct AlertPolicy {
    threshold: f64,
}

impl AlertPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn evaluate(&self, rate: f64) -> AlertState {
        if rate > self.threshold {
            AlertState::Critical
        } else {
            AlertState::Normal
        }
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::new(CRITICAL_LOAD_THRESHOLD)
    }
}
