//! Behavior-control core shared by every controllable actor.
//!
//! `actor-core` pairs a finite state machine for mutually-exclusive
//! movement/logic modes with an orchestration layer for independently
//! activatable abilities that run alongside the active state. The crate
//! decides *what runs* and *who owns motion* each tick — deterministic
//! transitions, per-tick motion arbitration, phase gating, stable
//! ordering — and leaves movement integration, input mapping, rendering,
//! and persistence storage to the owning actor's collaborators.
//!
//! Everything executes synchronously inside the actor's single-threaded,
//! fixed-phase update loop; there are no concurrency primitives anywhere.
pub mod ability;
pub mod actor;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod input;
pub mod pilot;
pub mod state;

pub use ability::{Ability, AbilityManager, FailureRecord, ManagerSnapshot, MotionDecision};
pub use actor::Actor;
pub use config::CoreConfig;
pub use context::{Context, ContextValue};
pub use error::{RegistrationError, TransitionError};
pub use event::{ActorEvent, EventQueue, EventRecord, FailureReason, Tick};
pub use input::{ActionInput, AxisInput, DeviceId, InputEdge};
pub use pilot::{drive_logic_phase, drive_physics_phase};
pub use state::{State, StateFactory, StateMachine, Transition};
