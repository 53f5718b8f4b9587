//! Independently activatable behavior modules.
//!
//! Abilities run concurrently with the active state and with each other.
//! The manager arbitrates one shared resource between them — the motion
//! channel — and lets any active ability gate a whole update phase.

mod arbitration;
mod manager;
mod snapshot;

pub use arbitration::MotionDecision;
pub use manager::{AbilityManager, FailureRecord};
pub use snapshot::ManagerSnapshot;

use glam::Vec3;

use crate::actor::Actor;
use crate::context::Context;
use crate::input::{ActionInput, AxisInput};

/// An independently activatable behavior module.
///
/// All hooks default to no-ops and all capability queries default to
/// "inert", so an implementation only spells out the channels it uses.
/// Capability queries are polled by the manager after every update pass;
/// they must be cheap and must not mutate.
pub trait Ability<A: Actor> {
    /// Called exactly once, at registration.
    fn setup(&mut self, actor: &mut A, id: &str) {
        let _ = (actor, id);
    }

    /// Called on the inactive→active edge.
    fn on_activate(&mut self, actor: &mut A, ctx: &Context) {
        let _ = (actor, ctx);
    }

    /// Called on the active→inactive edge.
    fn on_deactivate(&mut self, actor: &mut A, ctx: &Context) {
        let _ = (actor, ctx);
    }

    /// Receives every action transition while active. Broadcast: other
    /// active abilities see the same input, there is no consumption.
    fn on_input_action(&mut self, actor: &mut A, ctx: &Context, input: &ActionInput) {
        let _ = (actor, ctx, input);
    }

    /// Receives every axis sample while active. Broadcast, as above.
    fn on_input_axis(&mut self, actor: &mut A, ctx: &Context, input: &AxisInput) {
        let _ = (actor, ctx, input);
    }

    /// Variable-rate logic hook, called while active.
    fn update(&mut self, actor: &mut A, ctx: &Context, delta: f32) {
        let _ = (actor, ctx, delta);
    }

    /// Fixed-rate physics hook, called while active.
    fn physics_update(&mut self, actor: &mut A, ctx: &Context, delta: f32) {
        let _ = (actor, ctx, delta);
    }

    /// Whether this ability currently wants to drive the actor's motion.
    fn overrides_motion(&self) -> bool {
        false
    }

    /// Velocity supplied when this ability wins motion arbitration.
    fn motion_velocity(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Arbitration priority. Higher wins; ties go to registration order.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this ability suspends the logic phase of the owning state
    /// machine while active (e.g. a cutscene lock).
    fn gates_logic(&self) -> bool {
        false
    }

    /// Whether this ability suspends the physics phase while active.
    fn gates_physics(&self) -> bool {
        false
    }

    /// Opaque per-instance state for persistence. `None` means stateless.
    fn save_state(&self) -> Option<serde_json::Value> {
        None
    }

    /// Restores state previously produced by [`Ability::save_state`].
    fn restore_state(&mut self, state: &serde_json::Value) {
        let _ = state;
    }
}
