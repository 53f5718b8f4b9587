//! Ability registry, lifecycle, dispatch, and arbitration driver.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::actor::Actor;
use crate::config::CoreConfig;
use crate::context::Context;
use crate::error::RegistrationError;
use crate::event::{ActorEvent, EventQueue, EventRecord, FailureReason, Tick};
use crate::input::{ActionInput, AxisInput};

use super::arbitration::{self, MotionDecision};
use super::snapshot::ManagerSnapshot;
use super::Ability;

/// One reported ability failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub id: String,
    pub reason: FailureReason,
    pub detail: String,
    pub at: Tick,
}

struct AbilityEntry<A: Actor> {
    id: String,
    ability: Box<dyn Ability<A>>,
    active: bool,
}

/// Owns a registry of abilities, drives their lifecycle and per-tick
/// updates, arbitrates the motion channel, and reports phase gating.
///
/// Registration order is stable for the lifetime of an entry and is the
/// sole tie-break for arbitration and input broadcast. It is never
/// renumbered: unregistering removes the entry, and re-registering the
/// same identifier appends at the end.
pub struct AbilityManager<A: Actor> {
    entries: Vec<AbilityEntry<A>>,
    motion: MotionDecision,
    failures: VecDeque<FailureRecord>,
    failure_capacity: usize,
    context: Context,
    events: EventQueue,
    clock: Tick,
}

impl<A: Actor> AbilityManager<A> {
    pub fn new() -> Self {
        Self::with_config(&CoreConfig::default())
    }

    pub fn with_config(config: &CoreConfig) -> Self {
        Self {
            entries: Vec::new(),
            motion: MotionDecision::vacant(),
            failures: VecDeque::new(),
            failure_capacity: config.failure_log_capacity,
            context: Context::new(),
            events: EventQueue::new(config.event_queue_capacity),
            clock: Tick(0),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Registers an ability, calling its `setup` hook exactly once. A
    /// duplicate id is a non-fatal no-op that leaves the existing entry
    /// untouched.
    pub fn register(
        &mut self,
        actor: &mut A,
        id: &str,
        mut ability: Box<dyn Ability<A>>,
        auto_activate: bool,
    ) -> Result<(), RegistrationError> {
        if id.is_empty() {
            warn!(target: "actor_core::abilities", "ignoring ability registration with empty id");
            return Err(RegistrationError::EmptyId);
        }
        if self.position(id).is_some() {
            warn!(target: "actor_core::abilities", ability = %id, "ignoring duplicate ability registration");
            return Err(RegistrationError::DuplicateId { id: id.to_owned() });
        }

        ability.setup(actor, id);
        self.entries.push(AbilityEntry {
            id: id.to_owned(),
            ability,
            active: false,
        });
        debug!(target: "actor_core::abilities", ability = %id, "ability registered");

        if auto_activate {
            self.activate(actor, id);
        }
        Ok(())
    }

    /// Deactivates (releasing motion ownership, emitting the ended event)
    /// and removes an ability. Returns false for unknown ids.
    pub fn unregister(&mut self, actor: &mut A, id: &str) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.deactivate(actor, id);
        if let Some(pos) = self.position(id) {
            self.entries.remove(pos);
        }
        debug!(target: "actor_core::abilities", ability = %id, "ability unregistered");
        true
    }

    /// Activates an ability. Idempotent: an already-active ability is left
    /// alone and no duplicate notification is emitted.
    pub fn activate(&mut self, actor: &mut A, id: &str) -> bool {
        let Some(pos) = self.position(id) else {
            warn!(target: "actor_core::abilities", ability = %id, "cannot activate unknown ability");
            return false;
        };
        if self.entries[pos].active {
            return true;
        }
        self.entries[pos].active = true;
        let entry = &mut self.entries[pos];
        entry.ability.on_activate(actor, &self.context);
        debug!(target: "actor_core::abilities", ability = %id, "ability activated");
        self.events.publish(
            self.clock,
            ActorEvent::AbilityStarted { id: id.to_owned() },
        );
        true
    }

    /// Deactivates an ability, clearing any motion ownership it held. The
    /// vacancy is visible to callers after the next arbitration pass.
    /// Idempotent, like [`AbilityManager::activate`].
    pub fn deactivate(&mut self, actor: &mut A, id: &str) -> bool {
        let Some(pos) = self.position(id) else {
            warn!(target: "actor_core::abilities", ability = %id, "cannot deactivate unknown ability");
            return false;
        };
        if !self.entries[pos].active {
            return true;
        }
        self.entries[pos].active = false;
        let entry = &mut self.entries[pos];
        entry.ability.on_deactivate(actor, &self.context);
        if self.motion.owner.as_deref() == Some(id) {
            self.motion = MotionDecision::vacant();
        }
        debug!(target: "actor_core::abilities", ability = %id, "ability deactivated");
        self.events.publish(self.clock, ActorEvent::AbilityEnded { id: id.to_owned() });
        true
    }

    /// Broadcasts an action transition to every active ability in
    /// registration order. No first-match consumption: every active
    /// ability sees every input.
    pub fn dispatch_input_action(&mut self, actor: &mut A, input: &ActionInput) {
        for entry in self.entries.iter_mut().filter(|entry| entry.active) {
            entry.ability.on_input_action(actor, &self.context, input);
        }
    }

    /// Broadcasts an axis sample to every active ability in registration
    /// order.
    pub fn dispatch_input_axis(&mut self, actor: &mut A, input: &AxisInput) {
        for entry in self.entries.iter_mut().filter(|entry| entry.active) {
            entry.ability.on_input_axis(actor, &self.context, input);
        }
    }

    /// Logic-phase update for every active ability, in registration order,
    /// followed by an arbitration pass.
    pub fn process_logic(&mut self, actor: &mut A, delta: f32) {
        self.clock.0 += 1;
        for entry in self.entries.iter_mut().filter(|entry| entry.active) {
            entry.ability.update(actor, &self.context, delta);
        }
        self.rearbitrate();
    }

    /// Physics-phase update for every active ability, in registration
    /// order, followed by an arbitration pass.
    pub fn process_physics(&mut self, actor: &mut A, delta: f32) {
        for entry in self.entries.iter_mut().filter(|entry| entry.active) {
            entry.ability.physics_update(actor, &self.context, delta);
        }
        self.rearbitrate();
    }

    fn rearbitrate(&mut self) {
        self.motion = arbitration::arbitrate(
            self.entries
                .iter()
                .filter(|entry| entry.active && entry.ability.overrides_motion())
                .map(|entry| {
                    (
                        entry.id.as_str(),
                        entry.ability.priority(),
                        entry.ability.motion_velocity(),
                    )
                }),
        );
    }

    /// Identifier of the ability owning the motion channel, if any.
    pub fn motion_owner(&self) -> Option<&str> {
        self.motion.owner.as_deref()
    }

    pub fn has_motion_owner(&self) -> bool {
        self.motion.owner.is_some()
    }

    /// The arbitration winner's velocity; `None` while the channel is
    /// vacant. The owning actor applies this instead of the active state's
    /// velocity and must never merge multiple abilities' outputs.
    pub fn motion_velocity(&self) -> Option<glam::Vec3> {
        self.motion.owner.as_ref().map(|_| self.motion.velocity)
    }

    /// True iff any active ability gates the logic phase this tick.
    pub fn is_logic_gated(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.active && entry.ability.gates_logic())
    }

    /// True iff any active ability gates the physics phase this tick.
    pub fn is_physics_gated(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.active && entry.ability.gates_physics())
    }

    /// Records an advisory failure and emits [`ActorEvent::AbilityFailed`].
    /// Never deactivates the ability.
    pub fn report_failure(&mut self, id: &str, reason: FailureReason, detail: impl Into<String>) {
        let detail = detail.into();
        warn!(
            target: "actor_core::abilities",
            ability = %id,
            reason = %reason,
            detail = %detail,
            "ability reported failure"
        );
        if self.failures.len() >= self.failure_capacity {
            self.failures.pop_front();
        }
        self.failures.push_back(FailureRecord {
            id: id.to_owned(),
            reason,
            detail: detail.clone(),
            at: self.clock,
        });
        self.events.publish(
            self.clock,
            ActorEvent::AbilityFailed {
                id: id.to_owned(),
                reason,
                detail,
            },
        );
    }

    /// Retained failure records, oldest first.
    pub fn failures(&self) -> impl Iterator<Item = &FailureRecord> {
        self.failures.iter()
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.position(id)
            .is_some_and(|pos| self.entries[pos].active)
    }

    /// Registered ids in registration order.
    pub fn registered_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    /// Active ids in registration order.
    pub fn active_ids(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| entry.id.as_str())
    }

    /// Replaces the context snapshot wholesale.
    pub fn set_context(&mut self, context: Context) {
        self.context = context;
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Removes and returns pending notifications in publish order.
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        self.events.drain()
    }

    /// Captures the active-flag set and every ability's opaque state.
    pub fn snapshot(&self) -> ManagerSnapshot {
        ManagerSnapshot {
            active: self
                .entries
                .iter()
                .filter(|entry| entry.active)
                .map(|entry| entry.id.clone())
                .collect(),
            ability_state: self
                .entries
                .iter()
                .filter_map(|entry| {
                    entry
                        .ability
                        .save_state()
                        .map(|state| (entry.id.clone(), state))
                })
                .collect(),
        }
    }

    /// Restores a snapshot: the active set first (driving the normal
    /// activate/deactivate hooks), then each ability's opaque state, so a
    /// hook that touches its own state cannot clobber the restored blob.
    /// Snapshot entries for ids that are no longer registered are skipped
    /// with a warning.
    pub fn restore(&mut self, actor: &mut A, snapshot: &ManagerSnapshot) {
        let ids: Vec<String> = self.entries.iter().map(|entry| entry.id.clone()).collect();
        for id in &ids {
            if snapshot.active.iter().any(|active| active == id) {
                self.activate(actor, id);
            } else {
                self.deactivate(actor, id);
            }
        }
        for (id, state) in &snapshot.ability_state {
            match self.position(id) {
                Some(pos) => self.entries[pos].ability.restore_state(state),
                None => {
                    warn!(target: "actor_core::abilities", ability = %id, "snapshot references unknown ability");
                }
            }
        }
    }

    /// Snapshot as an opaque JSON blob for the persistence collaborator.
    pub fn serialize(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }

    /// Restores from a blob produced by [`AbilityManager::serialize`].
    pub fn deserialize(&mut self, actor: &mut A, blob: &str) -> serde_json::Result<()> {
        let snapshot: ManagerSnapshot = serde_json::from_str(blob)?;
        self.restore(actor, &snapshot);
        Ok(())
    }
}

impl<A: Actor> Default for AbilityManager<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    struct TestActor;

    impl Actor for TestActor {
        fn position(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn movement_input(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn apply_velocity(&mut self, _velocity: Vec3) {}
    }

    struct Mover {
        velocity: Vec3,
    }

    impl Ability<TestActor> for Mover {
        fn overrides_motion(&self) -> bool {
            true
        }
        fn motion_velocity(&self) -> Vec3 {
            self.velocity
        }
    }

    #[test]
    fn re_registration_appends_instead_of_restoring_position() {
        let mut actor = TestActor;
        let mut manager = AbilityManager::new();
        manager
            .register(&mut actor, "a", Box::new(Mover { velocity: Vec3::X }), true)
            .unwrap();
        manager
            .register(&mut actor, "b", Box::new(Mover { velocity: Vec3::Y }), true)
            .unwrap();

        manager.process_logic(&mut actor, 0.1);
        assert_eq!(manager.motion_owner(), Some("a"));

        // Removing and re-adding "a" moves it behind "b" in the order, so
        // the equal-priority tie now falls to "b".
        manager.unregister(&mut actor, "a");
        manager
            .register(&mut actor, "a", Box::new(Mover { velocity: Vec3::X }), true)
            .unwrap();
        manager.process_logic(&mut actor, 0.1);
        assert_eq!(manager.motion_owner(), Some("b"));
        assert_eq!(
            manager.registered_ids().collect::<Vec<_>>(),
            vec!["b", "a"]
        );
    }

    #[test]
    fn failure_log_is_bounded() {
        let config = CoreConfig::default().with_failure_log_capacity(2);
        let mut manager = AbilityManager::<TestActor>::with_config(&config);

        manager.report_failure("dash", FailureReason::Cooldown, "first");
        manager.report_failure("dash", FailureReason::Cooldown, "second");
        manager.report_failure("dash", FailureReason::Cooldown, "third");

        let details: Vec<&str> = manager.failures().map(|f| f.detail.as_str()).collect();
        assert_eq!(details, vec!["second", "third"]);
    }
}
