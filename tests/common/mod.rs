use campuswatch_client::storage::{
    MemoryStorage, PersistedSession, PersistedState, SessionStorage, STORAGE_VERSION,
};
use campuswatch_client::types::UserId;
use campuswatch_client::{ApiClient, ApiConfig, User};

pub fn alice() -> User {
    User::new(UserId::from("u1".to_string()), "alice", "alice@campus.edu")
}

/// Storage pre-populated with a signed-in session, as if a previous run had
/// logged in and persisted its state.
pub fn signed_in_storage(access_token: &str, refresh_token: Option<&str>) -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage
        .save(&PersistedSession {
            state: PersistedState {
                user: Some(alice()),
                is_authenticated: true,
                access_token: Some(access_token.to_string()),
                refresh_token: refresh_token.map(String::from),
            },
            version: STORAGE_VERSION,
        })
        .expect("memory storage never fails");
    storage
}

pub fn client_for(server_uri: &str, storage: MemoryStorage) -> ApiClient {
    let config = ApiConfig::new().with_base_url(server_uri.parse().expect("valid mock URI"));
    ApiClient::new(config, storage)
}
