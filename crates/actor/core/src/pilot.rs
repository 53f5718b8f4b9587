//! Canonical per-tick phase order.
//!
//! Owning actors call these helpers once per phase so every actor shares
//! the same sequence: ability updates (which end in an arbitration pass),
//! then the gating check, then the state machine, then the arbitration
//! winner's velocity. Actors with unusual needs may call the entry points
//! directly, in this order.

use crate::ability::AbilityManager;
use crate::actor::Actor;
use crate::state::StateMachine;

/// Drives one logic phase: abilities → gating check → state machine →
/// winner velocity. A gated machine is skipped for this tick only.
pub fn drive_logic_phase<A: Actor>(
    actor: &mut A,
    machine: &mut StateMachine<A>,
    abilities: &mut AbilityManager<A>,
    delta: f32,
) {
    abilities.process_logic(actor, delta);
    if !abilities.is_logic_gated() {
        machine.update(actor, delta);
    }
    if let Some(velocity) = abilities.motion_velocity() {
        actor.apply_velocity(velocity);
    }
}

/// Drives one physics phase, mirroring [`drive_logic_phase`].
pub fn drive_physics_phase<A: Actor>(
    actor: &mut A,
    machine: &mut StateMachine<A>,
    abilities: &mut AbilityManager<A>,
    delta: f32,
) {
    abilities.process_physics(actor, delta);
    if !abilities.is_physics_gated() {
        machine.physics_update(actor, delta);
    }
    if let Some(velocity) = abilities.motion_velocity() {
        actor.apply_velocity(velocity);
    }
}
