//! Process Configuration
//!
//! Everything the binary reads from the environment, parsed once at
//! startup. `.env` is loaded by `main` before [`ApiConfig::from_env`] runs.

use anyhow::{Context, bail};
use base64::Engine;
use base64::engine::general_purpose;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use auth::AuthConfig;
use reporting::ReportingConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Initial admin account created at startup when missing
#[derive(Clone)]
pub struct AdminBootstrap {
    pub user_name: String,
    pub password: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub reporting: ReportingConfig,
    pub admin: Option<AdminBootstrap>,
}

impl ApiConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL")
            .or_else(|| var("DB_URL"))
            .context("DATABASE_URL must be set in environment")?;

        let database_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            var("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let mut auth = match var("TOKEN_SECRET") {
            Some(secret_b64) => AuthConfig {
                token_secret: decode_secret(&secret_b64)?,
                ..AuthConfig::default()
            },
            None if cfg!(debug_assertions) => {
                tracing::warn!("TOKEN_SECRET not set, using a random per-process secret");
                AuthConfig::with_random_secret()
            }
            None => bail!("TOKEN_SECRET must be set in production"),
        };
        if let Some(ttl) = var("TOKEN_TTL_SECS") {
            let secs: u64 = ttl
                .trim()
                .parse()
                .with_context(|| format!("TOKEN_TTL_SECS is not a number: {ttl}"))?;
            auth.token_ttl = Duration::from_secs(secs);
        }
        auth.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        let mut reporting = ReportingConfig::default();
        if let Some(dir) = var("UPLOAD_DIR") {
            reporting.upload_dir = PathBuf::from(dir);
        }
        reporting.max_upload_bytes =
            parse_or("MAX_UPLOAD_BYTES", var("MAX_UPLOAD_BYTES"), reporting.max_upload_bytes)?;

        let admin = match (var("ADMIN_USERNAME"), var("ADMIN_PASSWORD")) {
            (Some(user_name), Some(password)) => Some(AdminBootstrap {
                user_name,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            port,
            frontend_origins,
            auth,
            reporting,
            admin,
        })
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("TOKEN_SECRET must be base64")?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("TOKEN_SECRET must decode to 32 bytes, got {}", bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/incidents")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.database_max_connections, 5);
        assert_eq!(cfg.reporting.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(cfg.frontend_origins.len(), 2);
        assert_eq!(cfg.auth.token_ttl, Duration::from_secs(86_400));
        assert!(cfg.auth.password_pepper.is_none());
        assert!(cfg.admin.is_none());
    }

    #[test]
    fn test_database_url_is_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[("DATABASE_URL", "  ")]).is_err());

        let cfg = config(&[("DB_URL", "postgres://fallback")]).unwrap();
        assert_eq!(cfg.database_url, "postgres://fallback");
    }

    #[test]
    fn test_overrides() {
        let secret = general_purpose::STANDARD.encode([7u8; 32]);
        let cfg = config(&[
            ("DATABASE_URL", "postgres://db"),
            ("PORT", "9000"),
            ("UPLOAD_DIR", "/var/uploads"),
            ("TOKEN_SECRET", &secret),
            ("TOKEN_TTL_SECS", "60"),
            ("PASSWORD_PEPPER", "pepper"),
            ("FRONTEND_ORIGINS", "https://a.example, ,https://b.example"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("ADMIN_USERNAME", "root"),
            ("ADMIN_PASSWORD", "rootpw"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.reporting.upload_dir, PathBuf::from("/var/uploads"));
        assert_eq!(cfg.reporting.max_upload_bytes, 1024);
        assert_eq!(cfg.auth.token_secret, [7u8; 32]);
        assert_eq!(cfg.auth.token_ttl_ms(), 60_000);
        assert_eq!(cfg.auth.pepper(), Some(b"pepper".as_slice()));
        assert_eq!(
            cfg.frontend_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(cfg.admin.unwrap().user_name, "root");
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("DATABASE_URL", "x"), ("PORT", "http")]).is_err());
        assert!(config(&[("DATABASE_URL", "x"), ("TOKEN_SECRET", "not base64!")]).is_err());

        let short = general_purpose::STANDARD.encode([1u8; 16]);
        assert!(config(&[("DATABASE_URL", "x"), ("TOKEN_SECRET", &short)]).is_err());
    }
}
