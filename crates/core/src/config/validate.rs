use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Backend URL is an http(s) URL
/// - Default page size is positive and offered in the page-size options
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Backend validation
    let url = config.backend.url.trim();
    if url.is_empty() {
        return Err(ConfigError::ValidationError(
            "backend.url cannot be empty".to_string(),
        ));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "backend.url must start with http:// or https://, got {}",
            url
        )));
    }

    // Table validation
    let table = &config.table;
    if table.rows_per_page == 0 || table.rows_per_page_options.contains(&0) {
        return Err(ConfigError::ValidationError(
            "table page sizes must be greater than 0".to_string(),
        ));
    }
    if !table.rows_per_page_options.contains(&table.rows_per_page) {
        return Err(ConfigError::ValidationError(format!(
            "table.rows_per_page ({}) must be one of table.rows_per_page_options {:?}",
            table.rows_per_page, table.rows_per_page_options
        )));
    }

    Ok(())
}
