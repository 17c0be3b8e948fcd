//! Polled edge detection
//!
//! Inputs are sampled once per tick rather than through interrupt
//! callbacks. A tick is 100 ms, which is well inside what a finger on the
//! panel or a push button needs, so interrupt latency buys nothing here.

/// Level change seen between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// No change since the previous tick
    None,
    /// Became active this tick
    Pressed,
    /// Became inactive this tick
    Released,
}

/// Tracks the previous level of one input
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    active: bool,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self { active: false }
    }

    /// Feed this tick's level and get the edge relative to the last tick
    pub fn update(&mut self, active: bool) -> Edge {
        let edge = match (self.active, active) {
            (false, true) => Edge::Pressed,
            (true, false) => Edge::Released,
            _ => Edge::None,
        };
        self.active = active;
        edge
    }

    /// Level seen on the last update
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let mut detector = EdgeDetector::new();
        assert_eq!(detector.update(false), Edge::None);
        assert_eq!(detector.update(true), Edge::Pressed);
        assert!(detector.is_active());
        assert_eq!(detector.update(true), Edge::None);
        assert_eq!(detector.update(false), Edge::Released);
        assert_eq!(detector.update(false), Edge::None);
        assert!(!detector.is_active());
    }
}
