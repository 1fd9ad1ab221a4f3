use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// CMS role held by an admin profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
    Editor,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::Editor => "editor",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(AdminRole::Admin),
            "editor" => Ok(AdminRole::Editor),
            other => Err(format!("unknown admin role '{}'", other)),
        }
    }
}

/// Authorization record that elevates a user to CMS editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub user_id: Uuid,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

impl AdminProfile {
    pub fn new(user_id: Uuid, role: AdminRole) -> Self {
        Self {
            user_id,
            role,
            created_at: Utc::now(),
        }
    }
}

/// Request-scoped session: who signed in and which profile, if any, backs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub profile: Option<AdminProfile>,
}

impl Session {
    pub fn role(&self) -> Option<AdminRole> {
        self.profile.as_ref().map(|p| p.role)
    }
}

/// Route guard capability check. Credentials alone never grant admin access.
pub fn has_admin_role(session: &Session) -> bool {
    matches!(
        session.role(),
        Some(AdminRole::Admin) | Some(AdminRole::Editor)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(profile: Option<AdminProfile>) -> Session {
        Session {
            user_id: Uuid::new_v4(),
            email: "coach@example.com".to_string(),
            profile,
        }
    }

    #[test]
    fn test_session_without_profile_is_not_admin() {
        assert!(!has_admin_role(&session(None)));
    }

    #[test]
    fn test_editor_and_admin_profiles_grant_access() {
        let user_id = Uuid::new_v4();
        assert!(has_admin_role(&session(Some(AdminProfile::new(
            user_id,
            AdminRole::Editor
        )))));
        assert!(has_admin_role(&session(Some(AdminProfile::new(
            user_id,
            AdminRole::Admin
        )))));
    }
}
