//! Cadence limiter for layout passes driven from the render loop.

/// Default spacing between layout passes, in milliseconds.
pub const DEFAULT_INTERVAL_MS: f64 = 80.0;

/// Accepts at most one layout pass per `interval_ms`.
///
/// The driver calls [`LayoutThrottle::ready`] from every animation frame with
/// its own clock; the throttle never reads a clock itself.
#[derive(Debug, Clone)]
pub struct LayoutThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl LayoutThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// True if a pass may run at `now_ms`, in which case `now_ms` becomes the
    /// new reference point. A clock that went backwards is accepted.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let due = match self.last_ms {
            None => true,
            Some(last) => now_ms < last || now_ms - last >= self.interval_ms,
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    /// Forget the last accepted pass so the next call runs.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

impl Default for LayoutThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_runs() {
        let mut throttle = LayoutThrottle::default();
        assert!(throttle.ready(1000.0));
    }

    #[test]
    fn test_holds_until_interval() {
        let mut throttle = LayoutThrottle::default();
        assert!(throttle.ready(0.0));
        assert!(!throttle.ready(16.0));
        assert!(!throttle.ready(79.9));
        assert!(throttle.ready(80.0));
        assert!(!throttle.ready(120.0));
        assert!(throttle.ready(160.0));
    }

    #[test]
    fn test_clock_regression_runs() {
        let mut throttle = LayoutThrottle::default();
        assert!(throttle.ready(500.0));
        assert!(throttle.ready(10.0));
        assert!(!throttle.ready(20.0));
    }

    #[test]
    fn test_reset() {
        let mut throttle = LayoutThrottle::new(1000.0);
        assert!(throttle.ready(0.0));
        assert!(!throttle.ready(1.0));
        throttle.reset();
        assert!(throttle.ready(2.0));
    }
}
