//! In-app notifications.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::Notification;
use crate::types::NotificationId;

impl ApiClient {
    /// The signed-in user's notifications, newest first.
    ///
    /// Safe to poll: overlapping calls are independent GETs and the refresh
    /// machinery coalesces any simultaneous token renewals.
    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.transport()
            .get("notifications/", "Unable to load notifications")
            .await
    }

    /// Mark one notification as read.
    pub async fn mark_notification_read(
        &self,
        id: &NotificationId,
    ) -> Result<Notification, ApiError> {
        self.transport()
            .patch(
                &format!("notifications/{id}/"),
                &serde_json::json!({ "is_read": true }),
                "Unable to update the notification",
            )
            .await
    }

    /// Mark every notification as read.
    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.transport()
            .post_unit(
                "notifications/mark-all-read/",
                "Unable to update notifications",
            )
            .await
    }

    /// Delete a notification.
    pub async fn delete_notification(&self, id: &NotificationId) -> Result<(), ApiError> {
        self.transport()
            .delete(
                &format!("notifications/{id}/"),
                "Unable to delete the notification",
            )
            .await
    }
}
