use std::env;
use std::path::PathBuf;

/// Runtime configuration for the catalog backend
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sea-orm connection string (default: local SQLite file)
    pub database_url: String,

    /// Directory under which `uploads/...` is written and served (default: "wwwroot")
    pub media_root: PathBuf,

    /// Maximum multipart request size in bytes (default: 20 MB)
    pub max_upload_size: usize,

    /// JWT Secret Key
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,

    /// Bearer token lifetime in minutes (default: 30)
    pub token_ttl_minutes: i64,

    /// The single administrative identity accepted by `/login`
    pub admin_username: String,
    pub admin_password: String,

    /// Interval between purges of expired blacklist entries (default: 60s)
    pub revocation_sweep_secs: u64,

    /// Allowed CORS Origins (comma separated, "*" for any)
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://car_rental.db?mode=rwc".to_string(),
            media_root: PathBuf::from("wwwroot"),
            max_upload_size: 20 * 1024 * 1024, // 20 MB
            jwt_secret: "secret".to_string(),
            jwt_issuer: "car-rental-backend".to_string(),
            jwt_audience: "car-rental-clients".to_string(),
            token_ttl_minutes: 30,
            admin_username: "Paras".to_string(),
            admin_password: "123".to_string(),
            revocation_sweep_secs: 60,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),

            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or(default.media_root),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            jwt_secret: env::var("JWT_SECRET").unwrap_or(default.jwt_secret), // Fallback for dev convenience, strictly enforced in production method
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or(default.jwt_issuer),
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or(default.jwt_audience),

            token_ttl_minutes: env::var("TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.token_ttl_minutes),

            admin_username: env::var("ADMIN_USERNAME").unwrap_or(default.admin_username),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or(default.admin_password),

            revocation_sweep_secs: env::var("REVOCATION_SWEEP_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.revocation_sweep_secs),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Config for local development and tests: in-memory SQLite, relative media root
    pub fn development() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            revocation_sweep_secs: 5,
            ..Self::default()
        }
    }

    /// Config for production. A signing secret must be supplied.
    pub fn production() -> anyhow::Result<Self> {
        Self::from_env().with_required_secret(env::var("JWT_SECRET").ok())
    }

    fn with_required_secret(self, secret: Option<String>) -> anyhow::Result<Self> {
        let secret = secret
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("CRITICAL: JWT_SECRET must be set"))?;
        Ok(Self {
            jwt_secret: secret,
            ..self
        })
    }

    /// True when every origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.token_ttl_minutes, 30);
        assert_eq!(config.admin_username, "Paras");
        assert_eq!(config.admin_password, "123");
        assert_eq!(config.media_root, PathBuf::from("wwwroot"));
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.token_ttl_minutes, 30);
    }

    #[test]
    fn test_explicit_origins_are_not_wildcard() {
        let config = AppConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
            ..AppConfig::default()
        };
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_production_requires_secret() {
        let base = AppConfig::default();
        assert!(base.clone().with_required_secret(None).is_err());
        assert!(base.clone().with_required_secret(Some("  ".to_string())).is_err());

        let config = base.with_required_secret(Some("k3y".to_string())).unwrap();
        assert_eq!(config.jwt_secret, "k3y");
    }
}
