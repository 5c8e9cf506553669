//! Account directory and profile management.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{ProfileUpdate, User};
use crate::transport::{FileData, FormData};
use crate::types::UserId;

impl ApiClient {
    /// All accounts (administrators).
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.transport().get("users/", "Unable to load users").await
    }

    /// A single account.
    pub async fn user(&self, id: &UserId) -> Result<User, ApiError> {
        self.transport()
            .get(&format!("users/{id}/"), "Unable to load the user")
            .await
    }

    /// The signed-in user's own profile.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.transport()
            .get("users/profile/", "Unable to load your profile")
            .await
    }

    /// Update the signed-in user's profile (multipart: text fields plus an
    /// optional picture upload).
    ///
    /// On success the fresh snapshot replaces the session user, so the
    /// persisted session and any subscribers see the change immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with the server's validation message when
    /// the update is rejected; the session user is left unchanged.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let user: User = self
            .transport()
            .put_multipart(
                "users/profile/",
                profile_form(update),
                "Unable to update your profile",
            )
            .await?;
        self.session().replace_user(user.clone());
        Ok(user)
    }

    /// Delete an account (administrators).
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        self.transport()
            .delete(&format!("users/{id}/"), "Unable to delete the user")
            .await
    }
}

fn profile_form(update: &ProfileUpdate) -> FormData {
    let mut texts = Vec::new();
    let fields = [
        ("first_name", &update.first_name),
        ("last_name", &update.last_name),
        ("middle_name", &update.middle_name),
        ("department", &update.department),
        ("bio", &update.bio),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            texts.push((name, value.clone()));
        }
    }
    FormData {
        texts,
        file: update.profile_picture.as_ref().map(|picture| FileData {
            field: "profile_picture",
            file_name: picture.file_name.clone(),
            content_type: picture.content_type.clone(),
            bytes: picture.bytes.clone(),
        }),
    }
}
