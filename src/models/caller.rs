//! Caller identity and access level.

use serde::{Deserialize, Serialize};

use super::Resource;

/// Access level of the person using the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
    /// Sees and edits every resource.
    Admin,
    /// Sees only their own resource.
    Viewer,
}

/// Who is asking. Viewers carry the id of their own resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub access: AccessLevel,
    pub resource_id: Option<String>,
}

impl Caller {
    /// An administrator.
    pub fn admin() -> Self {
        Self {
            access: AccessLevel::Admin,
            resource_id: None,
        }
    }

    /// A self-service viewer bound to `resource_id`.
    pub fn viewer(resource_id: impl Into<String>) -> Self {
        Self {
            access: AccessLevel::Viewer,
            resource_id: Some(resource_id.into()),
        }
    }

    /// Signs in at the given level.
    ///
    /// Viewer sign-in needs the id of an existing resource; anything else
    /// returns `None`. The resource id is ignored for admins.
    pub fn login(access: AccessLevel, resource_id: Option<&str>, resources: &[Resource]) -> Option<Self> {
        match access {
            AccessLevel::Admin => Some(Self::admin()),
            AccessLevel::Viewer => {
                let id = resource_id?;
                resources
                    .iter()
                    .any(|r| r.id == id)
                    .then(|| Self::viewer(id))
            }
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.access == AccessLevel::Admin
    }

    /// Whether this caller may see `resource`.
    pub fn can_see(&self, resource: &Resource) -> bool {
        match self.access {
            AccessLevel::Admin => true,
            AccessLevel::Viewer => self.resource_id.as_deref() == Some(resource.id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn team() -> Vec<Resource> {
        vec![
            Resource::new("r1", "Sarah Chen", Role::Qa),
            Resource::new("r2", "Marcus Johnson", Role::Qa),
        ]
    }

    #[test]
    fn test_admin_sees_everyone() {
        let caller = Caller::admin();
        assert!(team().iter().all(|r| caller.can_see(r)));
    }

    #[test]
    fn test_viewer_sees_only_self() {
        let caller = Caller::viewer("r2");
        let team = team();
        assert!(!caller.can_see(&team[0]));
        assert!(caller.can_see(&team[1]));
    }

    #[test]
    fn test_login() {
        let team = team();
        assert_eq!(Caller::login(AccessLevel::Admin, None, &team), Some(Caller::admin()));
        assert_eq!(
            Caller::login(AccessLevel::Viewer, Some("r1"), &team),
            Some(Caller::viewer("r1"))
        );
        assert_eq!(Caller::login(AccessLevel::Viewer, Some("r9"), &team), None);
        assert_eq!(Caller::login(AccessLevel::Viewer, None, &team), None);
    }
}
