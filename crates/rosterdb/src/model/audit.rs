use crate::types::{RecordId, Timestamp};
use derive_more::{Deref, DerefMut, IntoIterator};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

/// Principal recorded when a mutation arrives without caller context.
pub const SYSTEM_ACTOR_EMAIL: &str = "system@roster.local";
pub const SYSTEM_ACTOR_NAME: &str = "System Automation";

///
/// AuditLog
///
/// Immutable, append-only record of a single mutation. Never edited or
/// deleted by normal operations; only a full-store clear or reseed removes
/// audit history.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: RecordId,
    pub user_email: String,
    pub user_name: String,
    pub action: AuditAction,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub changes: AuditChanges,
    pub timestamp: Timestamp,
}

///
/// AuditAction
/// Serialized as the upper-snake tags the export format uses,
/// e.g. `CREATE_INTERVIEWER`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[remain::sorted]
pub enum AuditAction {
    CreateEvent,
    CreateInterviewer,
    DeleteEvent,
    DeleteInterviewer,
    ExportSnapshot,
    ImportMerge,
    UpdateEvent,
    UpdateInterviewer,
}

impl Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::CreateEvent => "CREATE_EVENT",
            Self::CreateInterviewer => "CREATE_INTERVIEWER",
            Self::DeleteEvent => "DELETE_EVENT",
            Self::DeleteInterviewer => "DELETE_INTERVIEWER",
            Self::ExportSnapshot => "EXPORT_SNAPSHOT",
            Self::ImportMerge => "IMPORT_MERGE",
            Self::UpdateEvent => "UPDATE_EVENT",
            Self::UpdateInterviewer => "UPDATE_INTERVIEWER",
        };
        write!(f, "{tag}")
    }
}

///
/// EntityType
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum EntityType {
    Event,
    Interviewer,
    Snapshot,
}

impl Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Event => "event",
            Self::Interviewer => "interviewer",
            Self::Snapshot => "snapshot",
        };
        write!(f, "{label}")
    }
}

///
/// AuditChanges
///
/// Either the full created/deleted record, or a field-level diff carrying
/// only the fields that actually changed. Untagged: a changeset-shaped map
/// parses as `Diff`, anything else as `Full`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuditChanges {
    Diff(ChangeSet),
    Full(serde_json::Value),
}

impl AuditChanges {
    #[must_use]
    pub const fn as_diff(&self) -> Option<&ChangeSet> {
        match self {
            Self::Diff(set) => Some(set),
            Self::Full(_) => None,
        }
    }
}

///
/// ChangeSet
/// `{field: {from, to}}` for exactly the fields that changed.
///

#[derive(
    Clone, Debug, Default, Deref, DerefMut, Deserialize, IntoIterator, PartialEq, Serialize,
)]
pub struct ChangeSet(BTreeMap<String, FieldChange>);

impl ChangeSet {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldChange> {
        self.0.get(name)
    }
}

///
/// FieldChange
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldChange {
    pub from: serde_json::Value,
    pub to: serde_json::Value,
}

///
/// Actor
/// Caller-supplied audit context.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub email: String,
    pub name: String,
}

impl Actor {
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// The fixed system principal used when no caller context is supplied.
    #[must_use]
    pub fn system() -> Self {
        Self::new(SYSTEM_ACTOR_EMAIL, SYSTEM_ACTOR_NAME)
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::system()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_serializes_as_upper_snake_tag() {
        let json = serde_json::to_string(&AuditAction::CreateInterviewer).unwrap();
        assert_eq!(json, "\"CREATE_INTERVIEWER\"");
        assert_eq!(AuditAction::CreateInterviewer.to_string(), "CREATE_INTERVIEWER");
    }

    #[test]
    fn untagged_changes_pick_diff_for_changeset_shapes() {
        let raw = json!({"name": {"from": "Ana", "to": "Ana Lopes"}});
        let changes: AuditChanges = serde_json::from_value(raw).unwrap();

        let diff = changes.as_diff().expect("changeset shape must parse as Diff");
        assert_eq!(diff.field("name").unwrap().to, json!("Ana Lopes"));
    }

    #[test]
    fn untagged_changes_fall_back_to_full_record() {
        let raw = json!({"id": "01ARZ3NDEKTSV4RRFFQ69G5FAV", "name": "Ana"});
        let changes: AuditChanges = serde_json::from_value(raw).unwrap();

        assert!(changes.as_diff().is_none());
    }

    #[test]
    fn system_actor_is_the_default() {
        let actor = Actor::default();
        assert_eq!(actor.email, SYSTEM_ACTOR_EMAIL);
        assert_eq!(actor.name, SYSTEM_ACTOR_NAME);
    }
}
