use std::time::Duration;

/// Operation weight, for the simulated network latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Get,
    Write,
    Save,
    Reset,
}

impl Op {
    fn base_millis(self) -> u64 {
        match self {
            Op::Reset => 300,
            Op::Get => 500,
            Op::Write => 600,
            Op::List => 800,
            Op::Save => 1000,
        }
    }
}

/// Artificial delay applied before every repository operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    scale: f64,
}

impl Latency {
    pub const NONE: Latency = Latency { scale: 0.0 };

    /// Negative or non-finite scales disable the simulation.
    #[must_use]
    pub fn scaled(scale: f64) -> Self {
        if scale.is_finite() && scale > 0.0 {
            Self { scale }
        } else {
            Self::NONE
        }
    }

    #[must_use]
    pub fn duration(&self, op: Op) -> Duration {
        Duration::from_secs_f64(op.base_millis() as f64 * self.scale / 1000.0)
    }

    pub async fn wait(&self, op: Op) {
        let delay = self.duration(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}
