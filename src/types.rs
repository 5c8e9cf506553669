use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Server-assigned user identifier.
///
/// Opaque to the client: the server chooses the format and the client only
/// ever echoes it back in path templates and payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct UserId(pub String);

/// Server-assigned incident identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct IncidentId(pub String);

/// Server-assigned comment identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct CommentId(pub String);

/// Server-assigned incident-category identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct CategoryId(pub String);

/// Server-assigned role identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct RoleId(pub String);

/// Server-assigned team identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct TeamId(pub String);

/// Server-assigned notification identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct NotificationId(pub String);

/// Server-assigned subscription identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct SubscriptionId(pub String);

impl<'a> From<&'a str> for IncidentId {
    fn from(s: &'a str) -> Self {
        Self(s.to_owned())
    }
}

impl<'a> From<&'a str> for CategoryId {
    fn from(s: &'a str) -> Self {
        Self(s.to_owned())
    }
}
