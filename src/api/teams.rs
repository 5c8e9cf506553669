//! Security team administration.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{NewTeam, Team, TeamUpdate};
use crate::types::{TeamId, UserId};

impl ApiClient {
    /// All teams.
    pub async fn teams(&self) -> Result<Vec<Team>, ApiError> {
        self.transport().get("teams/", "Unable to load teams").await
    }

    /// A single team with its members.
    pub async fn team(&self, id: &TeamId) -> Result<Team, ApiError> {
        self.transport()
            .get(&format!("teams/{id}/"), "Unable to load the team")
            .await
    }

    /// Create a team.
    pub async fn create_team(&self, team: &NewTeam) -> Result<Team, ApiError> {
        self.transport()
            .post("teams/", team, "Unable to create the team")
            .await
    }

    /// Update a team.
    pub async fn update_team(&self, id: &TeamId, team: &TeamUpdate) -> Result<Team, ApiError> {
        self.transport()
            .patch(&format!("teams/{id}/"), team, "Unable to update the team")
            .await
    }

    /// Delete a team.
    pub async fn delete_team(&self, id: &TeamId) -> Result<(), ApiError> {
        self.transport()
            .delete(&format!("teams/{id}/"), "Unable to delete the team")
            .await
    }

    /// Add a member to a team. Returns the updated team.
    pub async fn add_team_member(&self, id: &TeamId, user: &UserId) -> Result<Team, ApiError> {
        self.transport()
            .post(
                &format!("teams/{id}/members/"),
                &serde_json::json!({ "user": user }),
                "Unable to add the member",
            )
            .await
    }

    /// Remove a member from a team.
    pub async fn remove_team_member(&self, id: &TeamId, user: &UserId) -> Result<(), ApiError> {
        self.transport()
            .delete(
                &format!("teams/{id}/members/{user}/"),
                "Unable to remove the member",
            )
            .await
    }
}
