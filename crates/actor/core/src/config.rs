/// Core configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    /// Maximum number of transitions a single chain may perform before the
    /// pending transition is aborted and the last entered state is kept.
    pub transition_depth_limit: usize,

    /// Maximum number of retained ability failure records. Older records
    /// are discarded once the log is full.
    pub failure_log_capacity: usize,

    /// Maximum number of undrained notifications per queue. Overflow drops
    /// the oldest record.
    pub event_queue_capacity: usize,
}

impl CoreConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TRANSITION_DEPTH_LIMIT: usize = 3;
    pub const DEFAULT_FAILURE_LOG_CAPACITY: usize = 32;
    pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self {
            transition_depth_limit: Self::DEFAULT_TRANSITION_DEPTH_LIMIT,
            failure_log_capacity: Self::DEFAULT_FAILURE_LOG_CAPACITY,
            event_queue_capacity: Self::DEFAULT_EVENT_QUEUE_CAPACITY,
        }
    }

    pub fn with_transition_depth_limit(mut self, limit: usize) -> Self {
        self.transition_depth_limit = limit;
        self
    }

    pub fn with_failure_log_capacity(mut self, capacity: usize) -> Self {
        self.failure_log_capacity = capacity;
        self
    }

    pub fn with_event_queue_capacity(mut self, capacity: usize) -> Self {
        self.event_queue_capacity = capacity;
        self
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
