//! Caller identity for lifecycle operations

use shared::models::StaffRole;

use crate::auth::CurrentUser;

/// What a staff member is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Change reservation, inquiry and cart order status
    ManageBookings,
    /// Read flags on contact messages
    TriageMessages,
    /// Create, update and reorder dishes and dish types
    ManageMenu,
    DeleteMenu,
    DeleteMessages,
    ManageSettings,
}

impl Capability {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ManageBookings => "manage_bookings",
            Self::TriageMessages => "triage_messages",
            Self::ManageMenu => "manage_menu",
            Self::DeleteMenu => "delete_menu",
            Self::DeleteMessages => "delete_messages",
            Self::ManageSettings => "manage_settings",
        }
    }

    /// Roles holding this capability
    pub const fn roles(&self) -> &'static [StaffRole] {
        match self {
            Self::ManageBookings | Self::ManageMenu => &[StaffRole::Admin, StaffRole::Manager],
            Self::TriageMessages => &[StaffRole::Admin, StaffRole::Manager, StaffRole::Viewer],
            Self::DeleteMenu | Self::DeleteMessages | Self::ManageSettings => {
                &[StaffRole::Admin]
            }
        }
    }

    pub fn granted_to(&self, role: StaffRole) -> bool {
        self.roles().contains(&role)
    }
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub role: StaffRole,
}

impl AuthContext {
    pub fn new(user_id: impl Into<String>, role: StaffRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        capability.granted_to(self.role)
    }
}

impl From<&CurrentUser> for AuthContext {
    fn from(user: &CurrentUser) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_matrix() {
        let admin = AuthContext::new("1", StaffRole::Admin);
        let manager = AuthContext::new("2", StaffRole::Manager);
        let viewer = AuthContext::new("3", StaffRole::Viewer);

        for cap in [
            Capability::ManageBookings,
            Capability::TriageMessages,
            Capability::ManageMenu,
            Capability::DeleteMenu,
            Capability::DeleteMessages,
            Capability::ManageSettings,
        ] {
            assert!(admin.can(cap), "admin lacks {}", cap.as_str());
        }

        assert!(manager.can(Capability::ManageBookings));
        assert!(manager.can(Capability::ManageMenu));
        assert!(manager.can(Capability::TriageMessages));
        assert!(!manager.can(Capability::DeleteMenu));
        assert!(!manager.can(Capability::DeleteMessages));
        assert!(!manager.can(Capability::ManageSettings));

        assert!(viewer.can(Capability::TriageMessages));
        assert!(!viewer.can(Capability::DeleteMessages));
        assert!(!viewer.can(Capability::ManageBookings));
        assert!(!viewer.can(Capability::ManageMenu));
    }
}
