//! Operational configuration, loaded once from environment variables at
//! process start and shared read-only as `Arc<Config>` afterwards.

use std::env;

use crate::error::{GatewayError, Result};

/// Connection and key-namespacing parameters for the Redis state backend.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    /// Scope state keys by bot identity.
    pub with_bot_id: bool,
    /// Append the per-deployment discriminator to state keys.
    pub with_destiny: bool,
    pub destiny: String,
}

impl RedisConfig {
    /// Connection string for the redis client.
    pub fn dsn(&self) -> String {
        match &self.password {
            Some(pass) => format!("redis://:{}@{}:{}/0", pass, self.host, self.port),
            None => format!("redis://{}:{}/0", self.host, self.port),
        }
    }
}

/// Immutable snapshot of the gateway's operational parameters.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub admin_ids: Vec<i64>,
    pub use_redis: bool,
    /// Present when `use_redis` is set.
    pub redis: Option<RedisConfig>,
    /// Base URL of the auxiliary backend; the API middleware pair is only
    /// registered when this is set and the client constructs successfully.
    pub api_base_url: Option<String>,
    /// Bounded long-poll wait, so a termination signal is observed promptly.
    pub poll_timeout_secs: u32,
    pub log_file: Option<String>,
}

impl Config {
    /// Loads configuration from the environment. `token` overrides
    /// `BOT_TOKEN` when given (CLI flag).
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN")
                .map_err(|_| GatewayError::Config("BOT_TOKEN not set".to_string()))?,
        };

        let admin_ids = parse_admin_ids(&env::var("ADMINS").unwrap_or_default())?;

        let use_redis = parse_bool(&env::var("USE_REDIS").unwrap_or_default());
        let redis = if use_redis {
            Some(RedisConfig {
                host: env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("REDIS_PORT")
                    .ok()
                    .map(|p| {
                        p.parse().map_err(|_| {
                            GatewayError::Config(format!("invalid REDIS_PORT: {}", p))
                        })
                    })
                    .transpose()?
                    .unwrap_or(6379),
                password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
                with_bot_id: env::var("FSM_KEY_WITH_BOT_ID")
                    .map(|v| parse_bool(&v))
                    .unwrap_or(true),
                with_destiny: env::var("FSM_KEY_WITH_DESTINY")
                    .map(|v| parse_bool(&v))
                    .unwrap_or(true),
                destiny: env::var("FSM_DESTINY").unwrap_or_else(|_| "default".to_string()),
            })
        } else {
            None
        };

        let api_base_url = env::var("API_BASE_URL").ok().filter(|u| !u.is_empty());

        let poll_timeout_secs = env::var("POLL_TIMEOUT_SECS")
            .ok()
            .map(|v| {
                v.parse()
                    .map_err(|_| GatewayError::Config(format!("invalid POLL_TIMEOUT_SECS: {}", v)))
            })
            .transpose()?
            .unwrap_or(25);

        let log_file = env::var("LOG_FILE").ok().filter(|p| !p.is_empty());

        Ok(Self {
            bot_token,
            admin_ids,
            use_redis,
            redis,
            api_base_url,
            poll_timeout_secs,
            log_file,
        })
    }
}

fn parse_admin_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| GatewayError::Config(format!("invalid admin id in ADMINS: {}", s)))
        })
        .collect()
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "BOT_TOKEN",
            "ADMINS",
            "USE_REDIS",
            "REDIS_HOST",
            "REDIS_PORT",
            "REDIS_PASSWORD",
            "FSM_KEY_WITH_BOT_ID",
            "FSM_KEY_WITH_DESTINY",
            "FSM_DESTINY",
            "API_BASE_URL",
            "POLL_TIMEOUT_SECS",
            "LOG_FILE",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_with_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");
        env::set_var("ADMINS", "111,222");

        let config = Config::from_env(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.admin_ids, vec![111, 222]);
        assert!(!config.use_redis);
        assert!(config.redis.is_none());
        assert!(config.api_base_url.is_none());
        assert_eq!(config.poll_timeout_secs, 25);
    }

    #[test]
    #[serial]
    fn test_from_env_missing_token_is_config_error() {
        clear_env();

        let err = Config::from_env(None).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        assert!(err.is_fatal());
    }

    #[test]
    #[serial]
    fn test_from_env_token_override_wins() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");

        let config = Config::from_env(Some("cli_token".to_string())).unwrap();
        assert_eq!(config.bot_token, "cli_token");
    }

    #[test]
    #[serial]
    fn test_from_env_redis_settings() {
        clear_env();
        env::set_var("BOT_TOKEN", "t");
        env::set_var("USE_REDIS", "true");
        env::set_var("REDIS_HOST", "redis.internal");
        env::set_var("REDIS_PORT", "6380");
        env::set_var("REDIS_PASSWORD", "secret");
        env::set_var("FSM_KEY_WITH_DESTINY", "false");

        let config = Config::from_env(None).unwrap();
        let redis = config.redis.expect("redis config present");

        assert_eq!(redis.dsn(), "redis://:secret@redis.internal:6380/0");
        assert!(redis.with_bot_id);
        assert!(!redis.with_destiny);
        assert_eq!(redis.destiny, "default");
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_admin_id() {
        clear_env();
        env::set_var("BOT_TOKEN", "t");
        env::set_var("ADMINS", "111,not_a_number");

        assert!(matches!(
            Config::from_env(None),
            Err(GatewayError::Config(_))
        ));
    }

    #[test]
    #[serial]
    fn test_dsn_without_password() {
        clear_env();
        env::set_var("BOT_TOKEN", "t");
        env::set_var("USE_REDIS", "1");

        let config = Config::from_env(None).unwrap();
        assert_eq!(config.redis.unwrap().dsn(), "redis://localhost:6379/0");
    }
}
