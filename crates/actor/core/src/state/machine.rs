//! State registry and transition dispatch.

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::actor::Actor;
use crate::config::CoreConfig;
use crate::context::Context;
use crate::error::{RegistrationError, TransitionError};
use crate::event::{ActorEvent, EventQueue, EventRecord, Tick};

use super::{State, StateFactory, Transition};

struct StateEntry<A: Actor> {
    factory: StateFactory<A>,
    /// Built on first entry, retained across re-entries until unregister.
    instance: Option<Box<dyn State<A>>>,
}

/// Owns a registry of states and dispatches transitions, updates, and
/// events to the single active one.
///
/// All mutation happens synchronously inside the caller's tick; failed
/// operations leave the machine in its previous valid state.
pub struct StateMachine<A: Actor> {
    entries: BTreeMap<String, StateEntry<A>>,
    active: Option<String>,
    context: Context,
    events: EventQueue,
    clock: Tick,
    depth_limit: usize,
}

impl<A: Actor> StateMachine<A> {
    pub fn new() -> Self {
        Self::with_config(&CoreConfig::default())
    }

    pub fn with_config(config: &CoreConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            active: None,
            context: Context::new(),
            events: EventQueue::new(config.event_queue_capacity),
            clock: Tick(0),
            depth_limit: config.transition_depth_limit,
        }
    }

    /// Registers a state under `id`. The factory runs lazily on the first
    /// transition into the state. Empty or duplicate ids are rejected and
    /// leave the registry untouched.
    pub fn register<F>(&mut self, id: &str, factory: F) -> Result<(), RegistrationError>
    where
        F: Fn() -> Box<dyn State<A>> + 'static,
    {
        if id.is_empty() {
            warn!(target: "actor_core::machine", "ignoring state registration with empty id");
            return Err(RegistrationError::EmptyId);
        }
        if self.entries.contains_key(id) {
            warn!(target: "actor_core::machine", state = %id, "ignoring duplicate state registration");
            return Err(RegistrationError::DuplicateId { id: id.to_owned() });
        }
        self.entries.insert(
            id.to_owned(),
            StateEntry {
                factory: Box::new(factory),
                instance: None,
            },
        );
        Ok(())
    }

    /// Removes a state. If it is currently active it is exited first and
    /// the active identifier becomes unset.
    pub fn unregister(&mut self, actor: &mut A, id: &str) -> bool {
        if self.active.as_deref() == Some(id) {
            if let Some(entry) = self.entries.get_mut(id)
                && let Some(state) = entry.instance.as_mut()
            {
                state.exit(actor, &self.context);
            }
            self.active = None;
            debug!(target: "actor_core::machine", state = %id, "active state unregistered");
        }
        self.entries.remove(id).is_some()
    }

    /// Transitions to `id`, running the full exit/enter cycle and emitting
    /// exactly one [`ActorEvent::StateChanged`] per hop.
    ///
    /// Re-entering the active state re-runs exit/enter (an explicit reset).
    /// Hooks may request follow-up transitions; the chain is bounded by the
    /// configured depth limit. Only the first hop reports failure to the
    /// caller — once it has succeeded, failures in chained hops are logged
    /// and the last successfully entered state stays active.
    pub fn transition_to(
        &mut self,
        actor: &mut A,
        id: &str,
        payload: Context,
    ) -> Result<(), TransitionError> {
        let mut pending = Transition {
            target: id.to_owned(),
            payload,
        };
        let mut hops = 0usize;
        loop {
            if hops >= self.depth_limit {
                let err = TransitionError::ChainTooDeep {
                    id: pending.target,
                    depth: hops,
                    limit: self.depth_limit,
                };
                warn!(target: "actor_core::machine", error = %err, "aborting transition chain");
                return if hops == 0 { Err(err) } else { Ok(()) };
            }
            match self.transition_once(actor, pending) {
                Ok(None) => return Ok(()),
                Ok(Some(next)) => {
                    hops += 1;
                    pending = next;
                }
                Err(err) if hops == 0 => return Err(err),
                Err(err) => {
                    warn!(
                        target: "actor_core::machine",
                        error = %err,
                        "chained transition failed, keeping current state"
                    );
                    return Ok(());
                }
            }
        }
    }

    /// Performs a single exit/enter hop and returns any follow-up request
    /// made by the target's `enter`.
    fn transition_once(
        &mut self,
        actor: &mut A,
        request: Transition,
    ) -> Result<Option<Transition>, TransitionError> {
        let Transition { target, payload } = request;

        // Validate before mutating anything.
        if !self.entries.contains_key(&target) {
            return Err(TransitionError::UnknownState { id: target });
        }

        let previous = self.active.take();
        if let Some(prev) = previous.as_deref()
            && let Some(entry) = self.entries.get_mut(prev)
            && let Some(state) = entry.instance.as_mut()
        {
            state.exit(actor, &self.context);
        }

        let follow_up = match self.entries.get_mut(&target) {
            Some(entry) => {
                if entry.instance.is_none() {
                    trace!(target: "actor_core::machine", state = %target, "constructing state");
                    entry.instance = Some((entry.factory)());
                }
                match entry.instance.as_mut() {
                    Some(state) => state.enter(actor, &self.context, &payload),
                    None => None,
                }
            }
            None => None,
        };

        self.active = Some(target.clone());
        debug!(target: "actor_core::machine", previous = ?previous, current = %target, "state changed");
        self.events.publish(
            self.clock,
            ActorEvent::StateChanged {
                previous,
                current: target,
            },
        );
        Ok(follow_up)
    }

    /// Logic-phase dispatch to the active state. No-op when none is active.
    pub fn update(&mut self, actor: &mut A, delta: f32) {
        self.clock.0 += 1;
        if let Some(id) = self.active.as_deref()
            && let Some(entry) = self.entries.get_mut(id)
            && let Some(state) = entry.instance.as_mut()
        {
            state.update(actor, &self.context, delta);
        }
    }

    /// Physics-phase dispatch to the active state. No-op when none is active.
    pub fn physics_update(&mut self, actor: &mut A, delta: f32) {
        if let Some(id) = self.active.as_deref()
            && let Some(entry) = self.entries.get_mut(id)
            && let Some(state) = entry.instance.as_mut()
        {
            state.physics_update(actor, &self.context, delta);
        }
    }

    /// Forwards an event to the active state and applies any transition it
    /// requests. Dropped silently when no state is active.
    pub fn dispatch_event(&mut self, actor: &mut A, event: &str, data: &Context) {
        let request = if let Some(id) = self.active.as_deref()
            && let Some(entry) = self.entries.get_mut(id)
            && let Some(state) = entry.instance.as_mut()
        {
            state.handle_event(actor, &self.context, event, data)
        } else {
            trace!(target: "actor_core::machine", event, "no active state, event dropped");
            None
        };

        if let Some(next) = request {
            let Transition { target, payload } = next;
            if let Err(err) = self.transition_to(actor, &target, payload) {
                warn!(
                    target: "actor_core::machine",
                    event,
                    error = %err,
                    "transition requested by event handler failed"
                );
            }
        }
    }

    /// Replaces the context snapshot wholesale.
    pub fn set_context(&mut self, context: Context) {
        self.context = context;
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Identifier of the active state; unset before the first transition.
    pub fn current_state(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn registered_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Removes and returns pending notifications in publish order.
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        self.events.drain()
    }
}

impl<A: Actor> Default for StateMachine<A> {
    fn default() -> Self {
        Self::new()
    }
}
