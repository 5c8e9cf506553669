//! Incident categories: the public list plus the admin CRUD surface.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{CategoryUpdate, IncidentCategory, NewCategory};
use crate::types::CategoryId;

impl ApiClient {
    /// Categories available when filing a report.
    pub async fn categories(&self) -> Result<Vec<IncidentCategory>, ApiError> {
        self.transport()
            .get("incident-categories/", "Unable to load categories")
            .await
    }

    /// Full category list for administrators.
    pub async fn admin_categories(&self) -> Result<Vec<IncidentCategory>, ApiError> {
        self.transport()
            .get("incident-categories/admin/", "Unable to load categories")
            .await
    }

    /// Create a category.
    pub async fn create_category(
        &self,
        category: &NewCategory,
    ) -> Result<IncidentCategory, ApiError> {
        self.transport()
            .post(
                "incident-categories/admin/",
                category,
                "Unable to create the category",
            )
            .await
    }

    /// A single category, admin view.
    pub async fn admin_category(&self, id: &CategoryId) -> Result<IncidentCategory, ApiError> {
        self.transport()
            .get(
                &format!("incident-categories/admin/{id}/"),
                "Unable to load the category",
            )
            .await
    }

    /// Replace a category wholesale (PUT).
    pub async fn replace_category(
        &self,
        id: &CategoryId,
        category: &CategoryUpdate,
    ) -> Result<IncidentCategory, ApiError> {
        self.transport()
            .put(
                &format!("incident-categories/admin/{id}/"),
                category,
                "Unable to update the category",
            )
            .await
    }

    /// Partially update a category (PATCH).
    pub async fn update_category(
        &self,
        id: &CategoryId,
        category: &CategoryUpdate,
    ) -> Result<IncidentCategory, ApiError> {
        self.transport()
            .patch(
                &format!("incident-categories/admin/{id}/"),
                category,
                "Unable to update the category",
            )
            .await
    }

    /// Delete a category.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.transport()
            .delete(
                &format!("incident-categories/admin/{id}/"),
                "Unable to delete the category",
            )
            .await
    }
}
