//! Client-side views of CampusWatch server resources and the request
//! payloads the API accepts.
//!
//! The server owns all of this data; the client deserializes it verbatim and
//! never normalizes or validates beyond what the type declarations express.
//! Fields the server may omit are `Option` or defaulted.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{
    CategoryId, CommentId, IncidentId, NotificationId, RoleId, SubscriptionId, TeamId, UserId,
};

// ── Accounts ───────────────────────────────────────────────────────

/// A role attached to a user account (student, security, administrator, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Identity/profile snapshot of a CampusWatch account.
///
/// Replaced wholesale on refetch; never partially mutated on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_joined: Option<OffsetDateTime>,
    #[serde(default)]
    pub number_of_reported_incidents: Option<u32>,
}

impl User {
    /// Create a `User` with only the required fields.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            first_name: None,
            last_name: None,
            middle_name: None,
            department: None,
            bio: None,
            profile_picture: None,
            role: None,
            date_joined: None,
            number_of_reported_incidents: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Username/password pair for `auth/login/`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registration payload for `auth/signup/`.
///
/// Signing up does not sign the user in; a successful signup is followed by
/// an explicit [`login`](crate::ApiClient::login).
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Payload for `auth/complete-password-reset/`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetCompletion {
    pub token: String,
    pub new_password: String,
}

/// Successful `auth/login/` response: token pair plus the account snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// Profile changes for `users/profile/` (multipart PUT).
///
/// Only the set fields are sent. On success the server returns the updated
/// account; callers decide whether to replace the session user with it.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<ProfilePicture>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    #[must_use]
    pub fn with_profile_picture(mut self, picture: ProfilePicture) -> Self {
        self.profile_picture = Some(picture);
        self
    }
}

/// An image upload attached to a profile update.
#[derive(Debug, Clone)]
pub struct ProfilePicture {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payload for `roles/assign/`.
#[derive(Debug, Clone, Serialize)]
pub struct RoleAssignment {
    pub user: UserId,
    pub role: RoleId,
}

/// Payload for creating a role.
#[derive(Debug, Clone, Serialize)]
pub struct NewRole {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial role update (PATCH).
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Incidents ──────────────────────────────────────────────────────

/// Lifecycle state of an incident, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IncidentStatus {
    Reported,
    UnderReview,
    Resolved,
    Dismissed,
    /// A state this client version does not know about.
    #[serde(other)]
    Unknown,
}

/// A reported safety incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Incident {
    pub id: IncidentId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: IncidentStatus,
    #[serde(default)]
    pub category: Option<IncidentCategory>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub reporter: Option<User>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(default)]
    pub satisfaction_rating: Option<u8>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Payload for reporting an incident.
#[derive(Debug, Clone, Serialize)]
pub struct NewIncident {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl NewIncident {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: None,
            location: None,
            latitude: None,
            longitude: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// Partial incident update (PATCH); only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IncidentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IncidentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
}

/// Payload for `incident-votes/`.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentVote {
    pub incident_id: IncidentId,
    pub up_voted: bool,
}

/// A recorded vote.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct Vote {
    pub id: String,
    #[serde(default)]
    pub incident_id: Option<IncidentId>,
    #[serde(default)]
    pub up_voted: Option<bool>,
}

/// Reporter satisfaction with a resolved incident
/// (`incidents/{id}/satisfaction/` PATCH).
#[derive(Debug, Clone, Serialize)]
pub struct SatisfactionUpdate {
    #[serde(rename = "satisfaction_rating")]
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Aggregate incident counts for dashboards.
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct IncidentStatistics {
    #[serde(default)]
    pub total_incidents: u64,
    #[serde(default)]
    pub resolved_incidents: u64,
    #[serde(default)]
    pub under_review_incidents: u64,
    #[serde(default)]
    pub by_category: Vec<CategoryCount>,
}

/// Per-category slice of [`IncidentStatistics`].
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

// ── Categories ─────────────────────────────────────────────────────

/// An incident category (tag) used to classify reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial category update (PATCH) or full replacement (PUT).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Comments ───────────────────────────────────────────────────────

/// A discussion comment on an incident.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct Comment {
    pub id: CommentId,
    pub incident: IncidentId,
    pub body: String,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// Payload for posting a comment.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub incident: IncidentId,
    pub body: String,
}

impl NewComment {
    #[must_use]
    pub fn new(incident: IncidentId, body: impl Into<String>) -> Self {
        Self {
            incident,
            body: body.into(),
        }
    }
}

// ── Teams ──────────────────────────────────────────────────────────

/// A security team incidents are assigned to.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<User>,
}

/// Payload for creating a team.
#[derive(Debug, Clone, Serialize)]
pub struct NewTeam {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial team update (PATCH).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Notifications & subscriptions ──────────────────────────────────

/// An in-app notification.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub incident: Option<IncidentId>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// A category subscription (notify me about reports in this category).
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct Subscription {
    pub id: SubscriptionId,
    pub category: CategoryId,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}
