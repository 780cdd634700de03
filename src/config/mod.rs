use serde::{Deserialize, Serialize};
use std::env;

/// Runtime configuration, built once at startup and carried in the shared
/// application state rather than a global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the single-file SQLite store.
    pub path: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub admin_email: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn defaults() -> Self {
        Self {
            server: ServerConfig { port: 5000 },
            database: DatabaseConfig {
                path: "database.sqlite".to_string(),
                max_connections: 5,
            },
            security: SecurityConfig {
                jwt_secret: "your_jwt_secret_key".to_string(),
                jwt_expiry_hours: 24,
                admin_email: "admin@company.com".to_string(),
                admin_password: "admin123".to_string(),
            },
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        if let Ok(v) = env::var("DATABASE_PATH") {
            self.database.path = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }

        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("ADMIN_EMAIL") {
            self.security.admin_email = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            self.security.admin_password = v;
        }

        self
    }
}
