//! Mutually-exclusive behavior modes.
//!
//! A [`State`] is one named mode of an actor (idle, move, stagger, ...).
//! Exactly one state is active per machine; it is "active" strictly
//! between its `enter` and `exit` calls. States never call back into the
//! machine — hooks that want a follow-up transition *return* a
//! [`Transition`] request and the machine applies it, bounded by the
//! configured chain depth.

mod machine;

pub use machine::StateMachine;

use crate::actor::Actor;
use crate::context::Context;

/// A follow-up transition requested by a state hook.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub target: String,
    pub payload: Context,
}

impl Transition {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            payload: Context::new(),
        }
    }

    pub fn with_payload(mut self, payload: Context) -> Self {
        self.payload = payload;
        self
    }
}

/// A named behavior mode with an enter/exit lifecycle, two phase hooks,
/// and an event handler.
///
/// Generic over the owning actor type `A`; the actor is injected per call
/// and never stored. All hooks default to no-ops so implementations only
/// spell out what they react to.
pub trait State<A: Actor> {
    /// Called when the machine enters this state. `payload` carries
    /// transition-scoped data (the context snapshot stays in `ctx`).
    /// May request a follow-up transition.
    fn enter(&mut self, actor: &mut A, ctx: &Context, payload: &Context) -> Option<Transition> {
        let _ = (actor, ctx, payload);
        None
    }

    /// Called when the machine leaves this state. Instances persist after
    /// exit and keep their fields for the next entry.
    fn exit(&mut self, actor: &mut A, ctx: &Context) {
        let _ = (actor, ctx);
    }

    /// Variable-rate logic hook.
    fn update(&mut self, actor: &mut A, ctx: &Context, delta: f32) {
        let _ = (actor, ctx, delta);
    }

    /// Fixed-rate physics hook.
    fn physics_update(&mut self, actor: &mut A, ctx: &Context, delta: f32) {
        let _ = (actor, ctx, delta);
    }

    /// Handles a dispatched event. May request a transition.
    fn handle_event(
        &mut self,
        actor: &mut A,
        ctx: &Context,
        event: &str,
        data: &Context,
    ) -> Option<Transition> {
        let _ = (actor, ctx, event, data);
        None
    }
}

/// Factory used for lazy construction on first entry.
pub type StateFactory<A> = Box<dyn Fn() -> Box<dyn State<A>>>;
