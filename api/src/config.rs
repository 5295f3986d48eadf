//! Layered configuration loading
//!
//! Sources, later ones overriding earlier ones:
//! 1. Environment defaults (`AppConfig::for_environment`)
//! 2. `config.<environment>.toml` in the working directory, if present
//! 3. `CW__`-prefixed environment variables, e.g. `CW__BACKEND__GRAPHQL_URL`

use ::config::{Config, ConfigError, Environment as EnvSource, File};
use cw_shared::config::{AppConfig, Environment};

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "CW";

/// Load configuration for the environment named by `ENVIRONMENT`
pub fn load() -> Result<AppConfig, ConfigError> {
    load_for(Environment::from_env())
}

pub fn load_for(environment: Environment) -> Result<AppConfig, ConfigError> {
    let defaults = Config::try_from(&AppConfig::for_environment(environment))?;

    let config: AppConfig = Config::builder()
        .add_source(defaults)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config.validate().map_err(ConfigError::Message)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_for_environment() {
        let config = load_for(Environment::Production).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.cookies.auth_token_days, 7);
        assert_eq!(config.flow.password_min_length, 6);
    }
}
