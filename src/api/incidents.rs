//! Incident reporting, triage, and voting.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{
    Incident, IncidentStatistics, IncidentUpdate, IncidentVote, NewIncident, SatisfactionUpdate,
    Vote,
};
use crate::types::IncidentId;

impl ApiClient {
    /// Incidents visible without signing in (the public map).
    pub async fn public_incidents(&self) -> Result<Vec<Incident>, ApiError> {
        self.transport()
            .get_public("public/incidents/", "Unable to load incidents")
            .await
    }

    /// Aggregate counts for the public dashboard.
    pub async fn public_incident_statistics(&self) -> Result<IncidentStatistics, ApiError> {
        self.transport()
            .get_public("public/incident-statistics/", "Unable to load statistics")
            .await
    }

    /// All incidents the signed-in user may see.
    pub async fn incidents(&self) -> Result<Vec<Incident>, ApiError> {
        self.transport()
            .get("incidents/", "Unable to load incidents")
            .await
    }

    /// A single incident.
    pub async fn incident(&self, id: &IncidentId) -> Result<Incident, ApiError> {
        self.transport()
            .get(&format!("incidents/{id}/"), "Unable to load the incident")
            .await
    }

    /// Report a new incident under the signed-in account.
    pub async fn create_incident(&self, incident: &NewIncident) -> Result<Incident, ApiError> {
        self.transport()
            .post("incidents/", incident, "Unable to submit the report")
            .await
    }

    /// Report an incident without attribution. No authentication required.
    pub async fn create_anonymous_incident(
        &self,
        incident: &NewIncident,
    ) -> Result<Incident, ApiError> {
        self.transport()
            .post_public(
                "anonymous/incidents/",
                incident,
                "Unable to submit the report",
            )
            .await
    }

    /// Update an incident (status changes during triage, corrections).
    pub async fn update_incident(
        &self,
        id: &IncidentId,
        update: &IncidentUpdate,
    ) -> Result<Incident, ApiError> {
        self.transport()
            .patch(
                &format!("incidents/{id}/"),
                update,
                "Unable to update the incident",
            )
            .await
    }

    /// Delete an incident.
    pub async fn delete_incident(&self, id: &IncidentId) -> Result<(), ApiError> {
        self.transport()
            .delete(&format!("incidents/{id}/"), "Unable to delete the incident")
            .await
    }

    /// Incidents reported by the signed-in user.
    pub async fn my_reports(&self) -> Result<Vec<Incident>, ApiError> {
        self.transport()
            .get("incidents/my-reports/", "Unable to load your reports")
            .await
    }

    /// Up- or down-vote an incident.
    pub async fn vote_incident(&self, vote: &IncidentVote) -> Result<Vote, ApiError> {
        self.transport()
            .post("incident-votes/", vote, "Unable to record your vote")
            .await
    }

    /// Rate how satisfied the reporter is with the resolution.
    pub async fn rate_satisfaction(
        &self,
        id: &IncidentId,
        rating: &SatisfactionUpdate,
    ) -> Result<Incident, ApiError> {
        self.transport()
            .patch(
                &format!("incidents/{id}/satisfaction/"),
                rating,
                "Unable to submit your rating",
            )
            .await
    }

    /// Aggregate counts for signed-in dashboards.
    pub async fn incident_statistics(&self) -> Result<IncidentStatistics, ApiError> {
        self.transport()
            .get("incident-statistics/", "Unable to load statistics")
            .await
    }
}
