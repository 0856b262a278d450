//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CaravelConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::CaravelError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into CaravelConfig
/// 4. Applies environment variable overrides (CARAVEL_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<CaravelConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CaravelError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CaravelError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CaravelConfig = toml::from_str(&contents)
        .map_err(|e| CaravelError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CaravelError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Returns an error naming every
/// referenced variable that is not set.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CaravelError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CARAVEL_* prefix
///
/// Variables follow the pattern CARAVEL_<SECTION>_<KEY>, for example
/// CARAVEL_WIX_AUTH_TOKEN or CARAVEL_POSTGRESQL_HOST.
fn apply_env_overrides(config: &mut CaravelConfig) {
    if let Ok(val) = std::env::var("CARAVEL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("CARAVEL_WIX_BASE_URL") {
        config.wix.base_url = val;
    }
    if let Ok(val) = std::env::var("CARAVEL_WIX_AUTH_TOKEN") {
        config.wix.auth_token = secret_string(val);
    }
    if let Ok(val) = std::env::var("CARAVEL_WIX_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.wix.timeout_seconds = secs;
        }
    }

    if let Ok(val) = std::env::var("CARAVEL_SINK_TRANSACTIONAL") {
        config.sink.transactional = val.parse().unwrap_or(false);
    }

    if let Some(ref mut pg) = config.postgresql {
        if let Ok(val) = std::env::var("CARAVEL_POSTGRESQL_HOST") {
            pg.host = val;
        }
        if let Ok(val) = std::env::var("CARAVEL_POSTGRESQL_PORT") {
            if let Ok(port) = val.parse() {
                pg.port = port;
            }
        }
        if let Ok(val) = std::env::var("CARAVEL_POSTGRESQL_USER") {
            pg.user = val;
        }
        if let Ok(val) = std::env::var("CARAVEL_POSTGRESQL_PASSWORD") {
            pg.password = secret_string(val);
        }
        if let Ok(val) = std::env::var("CARAVEL_POSTGRESQL_DBNAME") {
            pg.dbname = val;
        }
        if let Ok(val) = std::env::var("CARAVEL_POSTGRESQL_CA_CERT") {
            pg.ca_cert = Some(val);
        }
    }

    if let Some(ref mut export) = config.export {
        if let Ok(val) = std::env::var("CARAVEL_EXPORT_OUTPUT_DIR") {
            export.output_dir = val;
        }
    }

    if let Ok(val) = std::env::var("CARAVEL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CARAVEL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CARAVEL_TEST_VAR", "test_value");
        let input = "auth_token = \"${CARAVEL_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "auth_token = \"test_value\"\n");
        std::env::remove_var("CARAVEL_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CARAVEL_MISSING_VAR");
        let input = "auth_token = \"${CARAVEL_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("CARAVEL_COMMENTED_VAR");
        let input = "# auth_token = \"${CARAVEL_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${CARAVEL_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[wix]
auth_token = "test-token"

[sink]
target = "json"

[export]
output_dir = "exports"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.wix.base_url, "https://www.wixapis.com");
        assert_eq!(config.application.log_level, "info");
        assert!(!config.sink.transactional);
    }
}
