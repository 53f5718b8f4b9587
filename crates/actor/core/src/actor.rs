//! Owning-actor contract.
//!
//! The core never stores a reference to the actor that owns it. Every phase
//! entry point receives `&mut A` for the duration of the call, the same way
//! a behavior node receives its context per tick. The actor keeps its
//! movement integration to itself; the core only hands it a resolved
//! velocity.

use glam::Vec3;

/// Interface the owning actor exposes to its states and abilities.
pub trait Actor {
    /// Current world-space position.
    fn position(&self) -> Vec3;

    /// Raw movement input for this tick (already device-mapped by the
    /// input layer; the core never polls devices).
    fn movement_input(&self) -> Vec3;

    /// Applies a resolved velocity prior to the actor's own movement
    /// integration. Called with the arbitration winner's velocity, or by
    /// the active state when no ability owns the motion channel.
    fn apply_velocity(&mut self, velocity: Vec3);
}
