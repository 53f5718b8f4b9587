//! Motion arbitration.
//!
//! The motion channel is the one exclusively-owned resource in the core:
//! at most one ability per pass may supply the actor's velocity. The
//! arbiter scans candidates in registration order and keeps the highest
//! priority; an equal-priority candidate never replaces a winner that is
//! already set, so ties fall to the first-registered candidate.

use glam::Vec3;

/// Outcome of an arbitration pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionDecision {
    /// Ability that owns the motion channel, if any.
    pub owner: Option<String>,
    /// The owner's velocity; zero when vacant.
    pub velocity: Vec3,
}

impl MotionDecision {
    pub const fn vacant() -> Self {
        Self {
            owner: None,
            velocity: Vec3::ZERO,
        }
    }
}

/// Selects the winner among `(id, priority, velocity)` candidates, which
/// must be supplied in registration order and already filtered to active,
/// motion-overriding abilities.
pub(crate) fn arbitrate<'a, I>(candidates: I) -> MotionDecision
where
    I: Iterator<Item = (&'a str, i32, Vec3)>,
{
    let mut winner: Option<(&str, Vec3)> = None;
    let mut winner_priority = i32::MIN;

    for (id, priority, velocity) in candidates {
        if priority > winner_priority || (priority == winner_priority && winner.is_none()) {
            winner = Some((id, velocity));
            winner_priority = priority;
        }
    }

    match winner {
        Some((id, velocity)) => MotionDecision {
            owner: Some(id.to_owned()),
            velocity,
        },
        None => MotionDecision::vacant(),
    }
}
