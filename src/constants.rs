//! Constants used throughout the application
//!
//! This module centralizes default values, user-facing messages and other
//! constant values to improve maintainability and consistency.

// Server API
pub const API_TOKEN_HEADER: &str = "X-API-Token";
pub const DEFAULT_SERVER_URL: &str = "https://localhost/rudder";
pub const DEFAULT_DATASOURCES_PATH: &str = "/api/latest/datasources";
pub const DEFAULT_TOKEN_ENV: &str = "RUDDER_API_TOKEN";

// Configuration files
pub const CONFIG_FILE_NAME: &str = "datasources.toml";
pub const CONFIG_DIR_NAME: &str = "datasources";
pub const LOG_FILE_NAME: &str = "datasources.log";

// New data source defaults
pub const DEFAULT_CHECK_SSL: bool = true;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_PARALLEL_REQ: u32 = 10;
pub const DEFAULT_SCHEDULE_SECS: u64 = 6 * 3600;
pub const DEFAULT_UPDATE_TIMEOUT_SECS: u64 = 30;

// Success Messages
pub const SUCCESS_DATASOURCE_CREATED: &str = "Data source created";
pub const SUCCESS_DATASOURCE_UPDATED: &str = "Data source updated";
pub const SUCCESS_DATASOURCE_DELETED: &str = "Data source deleted";
pub const SUCCESS_DATASOURCE_ENABLED: &str = "Data source enabled";
pub const SUCCESS_DATASOURCE_DISABLED: &str = "Data source disabled";

// Error Messages
pub const ERROR_DATASOURCE_LOAD_FAILED: &str = "Failed to load data sources";
pub const ERROR_DATASOURCE_CREATE_FAILED: &str = "Failed to create data source";
pub const ERROR_DATASOURCE_UPDATE_FAILED: &str = "Failed to update data source";
pub const ERROR_DATASOURCE_DELETE_FAILED: &str = "Failed to delete data source";
pub const ERROR_DATASOURCE_TOGGLE_FAILED: &str = "Failed to change data source state";
pub const ERROR_DATASOURCE_NOT_FOUND: &str = "Data source not found";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_plain_text() {
        let messages = [
            SUCCESS_DATASOURCE_CREATED,
            SUCCESS_DATASOURCE_UPDATED,
            SUCCESS_DATASOURCE_DELETED,
            SUCCESS_DATASOURCE_ENABLED,
            SUCCESS_DATASOURCE_DISABLED,
            ERROR_DATASOURCE_LOAD_FAILED,
            ERROR_DATASOURCE_CREATE_FAILED,
            ERROR_DATASOURCE_UPDATE_FAILED,
            ERROR_DATASOURCE_DELETE_FAILED,
            ERROR_DATASOURCE_TOGGLE_FAILED,
            ERROR_DATASOURCE_NOT_FOUND,
        ];
        for message in messages {
            assert!(message.is_ascii(), "{message}");
            assert!(message.starts_with(|c: char| c.is_ascii_uppercase()), "{message}");
        }
    }
}
