use log::{debug, error};
use rust_fsm::*;

state_machine! {
    derive(Debug, Clone, Copy, PartialEq, Eq)

    pub Occupancy(Empty)

    Empty => {
        Grew => Partial,
        Filled => Full,
    },

    Partial => {
        Grew => Partial,
        Shrank => Partial,
        Filled => Full,
        Drained => Empty,
    },

    Full => {
        Shrank => Partial,
        Drained => Empty,
    },
}

/// Input describing a change of length, or `None` if the length did not move.
pub fn classify(before: usize, after: usize, capacity: usize) -> Option<OccupancyInput> {
    if before == after {
        None
    } else if after == 0 {
        Some(OccupancyInput::Drained)
    } else if after == capacity {
        Some(OccupancyInput::Filled)
    } else if after > before {
        Some(OccupancyInput::Grew)
    } else {
        Some(OccupancyInput::Shrank)
    }
}

/// Follows one queue through `Empty`, `Partial` and `Full`.
pub struct OccupancyTracker {
    name: String,
    capacity: usize,
    len: usize,
    fsm: StateMachine<Occupancy>,
}

impl OccupancyTracker {
    pub fn new(name: &str, capacity: usize) -> Self {
        OccupancyTracker {
            name: name.to_string(),
            capacity,
            len: 0,
            fsm: StateMachine::<Occupancy>::new(),
        }
    }

    pub fn state(&self) -> &OccupancyState {
        self.fsm.state()
    }

    /// Feeds the queue's current length. Returns `false` if the change was impossible.
    pub fn observe(&mut self, len: usize) -> bool {
        let input = classify(self.len, len, self.capacity);
        self.len = len;

        let Some(input) = input else {
            return true;
        };

        let old_state = *self.fsm.state();
        if self.fsm.consume(&input).is_err() {
            error!(
                "{} input: {:?} is impossible in state {:?}",
                self.name, input, old_state
            );
            return false;
        }

        debug!(
            "{} input: {:?}, from {:?} to {:?}",
            self.name,
            input,
            old_state,
            self.fsm.state()
        );
        true
    }
}

mod test {

    #[test]
    fn test_classify() {
        use super::{classify, OccupancyInput};

        assert_eq!(classify(0, 0, 3), None);
        assert_eq!(classify(0, 1, 3), Some(OccupancyInput::Grew));
        assert_eq!(classify(2, 3, 3), Some(OccupancyInput::Filled));
        assert_eq!(classify(3, 2, 3), Some(OccupancyInput::Shrank));
        assert_eq!(classify(1, 0, 3), Some(OccupancyInput::Drained));
        assert_eq!(classify(0, 1, 1), Some(OccupancyInput::Filled));
    }

    #[test]
    fn test_tracker_walks_states() {
        use super::{OccupancyState, OccupancyTracker};

        let mut tracker = OccupancyTracker::new("q", 3);
        assert_eq!(tracker.state(), &OccupancyState::Empty);

        assert!(tracker.observe(1));
        assert_eq!(tracker.state(), &OccupancyState::Partial);
        assert!(tracker.observe(3));
        assert_eq!(tracker.state(), &OccupancyState::Full);
        assert!(tracker.observe(3));
        assert_eq!(tracker.state(), &OccupancyState::Full);
        assert!(tracker.observe(2));
        assert_eq!(tracker.state(), &OccupancyState::Partial);
        assert!(tracker.observe(0));
        assert_eq!(tracker.state(), &OccupancyState::Empty);
        assert!(tracker.observe(3));
        assert_eq!(tracker.state(), &OccupancyState::Full);
    }

    #[test]
    fn test_growing_past_capacity_is_impossible() {
        use super::{OccupancyState, OccupancyTracker};

        let mut tracker = OccupancyTracker::new("q", 2);
        assert!(tracker.observe(2));
        assert!(!tracker.observe(3));
        assert_eq!(tracker.state(), &OccupancyState::Full);
        assert!(tracker.observe(1));
        assert_eq!(tracker.state(), &OccupancyState::Partial);
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        use super::{OccupancyState, OccupancyTracker};

        let mut tracker = OccupancyTracker::new("q", 0);
        assert!(tracker.observe(0));
        assert_eq!(tracker.state(), &OccupancyState::Empty);
    }
}
