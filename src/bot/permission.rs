//! Who may run which command.
//!
//! Owners are a fixed list of user IDs from configuration. Admins are owners plus
//! anyone holding the optional allowed role.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Permissions {
    owner_ids: HashSet<u64>,
    allowed_role_id: Option<u64>,
}

impl Permissions {
    pub fn new(owner_ids: impl IntoIterator<Item = u64>, allowed_role_id: Option<u64>) -> Self {
        Self {
            owner_ids: owner_ids.into_iter().collect(),
            allowed_role_id,
        }
    }

    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_ids.contains(&user_id)
    }

    /// Whether the user is an owner or holds the allowed role.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the author
    /// - `role_ids` - Roles the author holds in the guild the command was sent in
    pub fn is_admin(&self, user_id: u64, role_ids: &[u64]) -> bool {
        self.is_owner(user_id)
            || self
                .allowed_role_id
                .is_some_and(|role| role_ids.contains(&role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owners_are_admins() {
        let permissions = Permissions::new([1, 2], None);

        assert!(permissions.is_owner(1));
        assert!(permissions.is_admin(2, &[]));
        assert!(!permissions.is_owner(3));
    }

    #[test]
    fn allowed_role_grants_admin_only() {
        let permissions = Permissions::new([1], Some(50));

        assert!(permissions.is_admin(7, &[40, 50]));
        assert!(!permissions.is_owner(7));
        assert!(!permissions.is_admin(7, &[40]));
    }

    #[test]
    fn no_role_configured_means_owners_only() {
        let permissions = Permissions::new([1], None);

        assert!(!permissions.is_admin(7, &[50]));
    }
}
