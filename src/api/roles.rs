//! Role administration.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{NewRole, Role, RoleAssignment, RoleUpdate, User};
use crate::types::RoleId;

impl ApiClient {
    /// All roles.
    pub async fn roles(&self) -> Result<Vec<Role>, ApiError> {
        self.transport().get("roles/", "Unable to load roles").await
    }

    /// Create a role.
    pub async fn create_role(&self, role: &NewRole) -> Result<Role, ApiError> {
        self.transport()
            .post("roles/", role, "Unable to create the role")
            .await
    }

    /// Update a role.
    pub async fn update_role(&self, id: &RoleId, role: &RoleUpdate) -> Result<Role, ApiError> {
        self.transport()
            .patch(&format!("roles/{id}/"), role, "Unable to update the role")
            .await
    }

    /// Delete a role.
    pub async fn delete_role(&self, id: &RoleId) -> Result<(), ApiError> {
        self.transport()
            .delete(&format!("roles/{id}/"), "Unable to delete the role")
            .await
    }

    /// Assign a role to a user. Returns the updated account.
    pub async fn assign_role(&self, assignment: &RoleAssignment) -> Result<User, ApiError> {
        self.transport()
            .post("roles/assign/", assignment, "Unable to assign the role")
            .await
    }
}
