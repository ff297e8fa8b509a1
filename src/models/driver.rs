use serde::Serialize;

/// Driver registry row. Drivers are managed elsewhere; the engine only
/// resolves usernames to ids.
#[derive(Debug, Clone, Serialize)]
pub struct Driver {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}
