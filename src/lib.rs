#![doc = include_str!("../README.md")]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;
mod transport;
pub mod types;

// Re-exports for convenient access
pub use api::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use models::{
    Comment, Credentials, Incident, IncidentCategory, IncidentStatistics, IncidentStatus,
    IncidentUpdate, IncidentVote, NewComment, NewIncident, Notification, ProfilePicture,
    ProfileUpdate, Role, SignupRequest, Subscription, Team, User, Vote,
};
pub use session::{Session, SessionState};
pub use storage::{FileStorage, MemoryStorage, PersistedSession, PersistedState, SessionStorage};
