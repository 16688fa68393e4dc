//! Server Configuration
//!
//! Built once from the environment at startup; nothing reads the
//! environment after this.

use anyhow::{Context, bail};
use auth::AuthConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub environment: String,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(p) => p.parse().with_context(|| format!("PORT is not a valid port: {p}"))?,
            None => DEFAULT_PORT,
        };

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(n) => n
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {n}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let parts = [
                    "DATABASE_USER",
                    "DATABASE_PASSWORD",
                    "DATABASE_HOST",
                    "DATABASE_PORT",
                    "DATABASE_NAME",
                ]
                .map(|key| get(key));
                match parts {
                    [Some(user), Some(password), Some(host), Some(port), Some(name)] => {
                        format!("postgres://{user}:{password}@{host}:{port}/{name}?sslmode=require")
                    }
                    _ => bail!(
                        "DATABASE_URL or all of DATABASE_HOST/PORT/NAME/USER/PASSWORD must be set"
                    ),
                }
            }
        };

        let mut auth = match get("JWT_SECRET") {
            Some(secret) => AuthConfig::with_secret(secret),
            None => AuthConfig::default(),
        };
        auth.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);

        Ok(Self {
            port,
            database_url,
            max_connections,
            environment: get("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            auth,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/conduit")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
        assert!(config.auth.uses_default_secret());
        assert!(config.auth.pepper().is_none());
    }

    #[test]
    fn test_database_url_from_parts() {
        let config = load(&[
            ("DATABASE_HOST", "db.internal"),
            ("DATABASE_PORT", "5432"),
            ("DATABASE_NAME", "conduit"),
            ("DATABASE_USER", "app"),
            ("DATABASE_PASSWORD", "pw"),
        ])
        .unwrap();

        assert_eq!(
            config.database_url,
            "postgres://app:pw@db.internal:5432/conduit?sslmode=require"
        );
    }

    #[test]
    fn test_database_url_required() {
        let err = load(&[("DATABASE_HOST", "db.internal")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/conduit"),
            ("PORT", "3000"),
            ("JWT_SECRET", "not-the-default"),
            ("PASSWORD_PEPPER", "pepper"),
            ("ENVIRONMENT", "Production"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 20);
        assert!(!config.auth.uses_default_secret());
        assert_eq!(config.auth.pepper(), Some(&b"pepper"[..]));
        assert!(config.is_production());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("DATABASE_URL", "postgres://x"), ("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
