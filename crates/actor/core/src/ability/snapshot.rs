//! Persistence snapshot for the ability manager.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Serializable capture of the manager's active-flag set and each
/// ability's opaque per-instance state, keyed by identifier.
///
/// The persistence collaborator treats the serialized form as opaque; the
/// per-ability values are whatever [`save_state`] produced and are handed
/// back verbatim to [`restore_state`] on load.
///
/// [`save_state`]: super::Ability::save_state
/// [`restore_state`]: super::Ability::restore_state
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerSnapshot {
    /// Active ability ids in registration order.
    pub active: Vec<String>,
    /// Opaque per-ability state; stateless abilities are absent.
    pub ability_state: BTreeMap<String, serde_json::Value>,
}
