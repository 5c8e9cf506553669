//! Category subscriptions.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::Subscription;
use crate::types::{CategoryId, SubscriptionId};

impl ApiClient {
    /// The signed-in user's subscriptions.
    pub async fn subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        self.transport()
            .get("subscriptions/", "Unable to load subscriptions")
            .await
    }

    /// Subscribe to a category's incident notifications.
    pub async fn subscribe(&self, category: &CategoryId) -> Result<Subscription, ApiError> {
        self.transport()
            .post(
                "subscriptions/",
                &serde_json::json!({ "category": category }),
                "Unable to subscribe",
            )
            .await
    }

    /// Remove a subscription.
    pub async fn unsubscribe(&self, id: &SubscriptionId) -> Result<(), ApiError> {
        self.transport()
            .delete(&format!("subscriptions/{id}/"), "Unable to unsubscribe")
            .await
    }
}
