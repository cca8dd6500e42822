use crate::{
    error::Error,
    types::{RecordId, Timestamp},
};
use serde::{Deserialize, Serialize};

///
/// Interviewer
///
/// Identity record. `email` is the natural key: unique across the whole
/// collection and immutable after creation.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interviewer {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Ordered for display; order is otherwise not significant.
    #[serde(default)]
    pub skills: Vec<String>,
    pub is_active: bool,
    pub calendar_sync_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Interviewer {
    /// Materialize a draft into a full record with a fresh id and
    /// `created_at == updated_at == now`.
    pub(crate) fn from_draft(draft: InterviewerDraft) -> Self {
        let now = Timestamp::now();

        Self {
            id: RecordId::generate(),
            name: draft.name,
            email: draft.email,
            role: draft.role,
            skills: draft.skills,
            is_active: draft.is_active,
            calendar_sync_enabled: draft.calendar_sync_enabled,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a patch; `email` and `id` are never touched.
    pub(crate) fn apply(&mut self, patch: InterviewerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(calendar_sync_enabled) = patch.calendar_sync_enabled {
            self.calendar_sync_enabled = calendar_sync_enabled;
        }
    }
}

///
/// Role
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum Role {
    Admin,
    Talent,
    #[default]
    Viewer,
}

///
/// InterviewerDraft
/// Creation input; the store assigns id and timestamps.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InterviewerDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub calendar_sync_enabled: bool,
}

const fn default_active() -> bool {
    true
}

impl InterviewerDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            skills: Vec::new(),
            is_active: true,
            calendar_sync_enabled: false,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("interviewer name must not be empty"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(Error::validation(format!(
                "invalid interviewer email: '{}'",
                self.email
            )));
        }

        Ok(())
    }
}

///
/// InterviewerPatch
/// Every mutable field, each optional. `email` is deliberately absent.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct InterviewerPatch {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub skills: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub calendar_sync_enabled: Option<bool>,
}

impl InterviewerPatch {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(Error::validation("interviewer name must not be empty"));
        }

        Ok(())
    }
}

///
/// TESTS
///
