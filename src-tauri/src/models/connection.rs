use serde::Serialize;

/// Connection record for the university records store.
///
/// The client targets one fixed departmental database, so the coordinates
/// are compiled in rather than read from the environment or a config file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    /// Never serialized; only used to build the connection string.
    #[serde(skip_serializing)]
    pub password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            host: "localhost".to_string(),
            port: 5432,
            database: "university_db".to_string(),
            username: "vjti".to_string(),
            password: "vjti@123".to_string(),
        }
    }
}
