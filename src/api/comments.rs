//! Incident discussion threads.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Comment, NewComment};
use crate::types::{CommentId, IncidentId};

impl ApiClient {
    /// Post a comment on an incident.
    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        self.transport()
            .post("chat/comments/", comment, "Unable to post your comment")
            .await
    }

    /// A single comment.
    pub async fn comment(&self, id: &CommentId) -> Result<Comment, ApiError> {
        self.transport()
            .get(&format!("chat/comments/{id}/"), "Unable to load the comment")
            .await
    }

    /// The comment thread of one incident.
    pub async fn incident_comments(
        &self,
        incident: &IncidentId,
    ) -> Result<Vec<Comment>, ApiError> {
        self.transport()
            .get(
                &format!("chat/comments/?incident={incident}"),
                "Unable to load comments",
            )
            .await
    }

    /// Delete a comment.
    pub async fn delete_comment(&self, id: &CommentId) -> Result<(), ApiError> {
        self.transport()
            .delete(
                &format!("chat/comments/{id}/"),
                "Unable to delete the comment",
            )
            .await
    }
}
