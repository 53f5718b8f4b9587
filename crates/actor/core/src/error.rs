//! Error types for registry and transition operations.
//!
//! Everything here is recovered locally: registration failures are ignored
//! after logging, transition failures leave the machine in its previous
//! valid state. Nothing in the core terminates the process.

/// Errors surfaced when registering a state or ability.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("identifier must not be empty")]
    EmptyId,

    #[error("'{id}' is already registered")]
    DuplicateId { id: String },
}

/// Errors surfaced while transitioning between states.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("state '{id}' is not registered")]
    UnknownState { id: String },

    #[error("transition chain too deep: aborted at '{id}' after {depth} hops (limit {limit})")]
    ChainTooDeep {
        id: String,
        depth: usize,
        limit: usize,
    },
}
