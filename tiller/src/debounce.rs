//! Throttling of navigation actions.

use std::time::{Duration, Instant};

/// Default spacing between accepted navigation actions.
pub const DEFAULT_DEBOUNCE_INTERVAL: Duration = Duration::from_millis(50);

/// Drops actions that arrive too soon after the last accepted one.
///
/// A single gate guards every action entry point of a navigator, so rapid
/// device repeats and contact bounce collapse into one move. The gate
/// starts open: the first action after construction always passes.
#[derive(Debug, Clone)]
pub struct DebounceGate {
    interval: Duration,
    last: Option<Instant>,
}

impl DebounceGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Admit or drop an action occurring at `now`. An admitted action
    /// records its time; a dropped one does not extend the window. An
    /// action exactly one interval after the last accepted one passes.
    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last
            && now.duration_since(last) < self.interval
        {
            return false;
        }
        self.last = Some(now);
        true
    }

    /// Forget the last accepted action so the next one always passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_action_passes() {
        let mut gate = DebounceGate::default();
        assert!(gate.admit(Instant::now()));
    }

    #[test]
    fn test_drops_within_interval() {
        let mut gate = DebounceGate::default();
        let base = Instant::now();
        assert!(gate.admit(base));
        assert!(!gate.admit(base + Duration::from_millis(49)));
    }

    #[test]
    fn test_passes_at_exact_interval() {
        let mut gate = DebounceGate::default();
        let base = Instant::now();
        assert!(gate.admit(base));
        assert!(gate.admit(base + Duration::from_millis(50)));
    }

    #[test]
    fn test_dropped_action_does_not_extend_window() {
        let mut gate = DebounceGate::default();
        let base = Instant::now();
        assert!(gate.admit(base));
        // a drop at 40ms must not push the window to 90ms
        assert!(!gate.admit(base + Duration::from_millis(40)));
        assert!(gate.admit(base + Duration::from_millis(50)));
    }

    #[test]
    fn test_zero_interval_never_drops() {
        let mut gate = DebounceGate::new(Duration::ZERO);
        let base = Instant::now();
        assert!(gate.admit(base));
        assert!(gate.admit(base));
        assert!(gate.admit(base));
    }

    #[test]
    fn test_reset_reopens_gate() {
        let mut gate = DebounceGate::default();
        let base = Instant::now();
        assert!(gate.admit(base));
        gate.reset();
        assert!(gate.admit(base + Duration::from_millis(1)));
    }

    #[test]
    fn test_default_interval_is_50ms() {
        assert_eq!(DebounceGate::default().interval(), Duration::from_millis(50));
    }
}
