use anyhow::{Context, Result, anyhow};

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Minimum length of `SESSION_SECRET`, the key material of the private cookie jar.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
        run_migrations: bool,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionConfig {
    Grpc { addr: String },
    Redis { url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub session_secret: String,
    pub store: StoreConfig,
    pub session: SessionConfig,
    pub cors_allowed_origins: Vec<String>,
    pub otel_endpoint: Option<String>,
    pub log_dir: Option<String>,
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .context("PORT must be a valid u16 integer")?,
            None => 8080,
        };

        let session_secret =
            var("SESSION_SECRET").context("Missing environment variable: SESSION_SECRET")?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(anyhow!(
                "SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes long"
            ));
        }

        let store = match var("STORE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => {
                let database_url = var("DATABASE_URL")
                    .context("Missing environment variable: DATABASE_URL")?;
                let max_connections = match var("DB_MAX_CONNECTIONS") {
                    Some(value) => value
                        .parse::<u32>()
                        .context("DB_MAX_CONNECTIONS must be a valid u32 integer")?,
                    None => 5,
                };
                let run_migrations = match var("RUN_MIGRATIONS") {
                    Some(value) => parse_bool("RUN_MIGRATIONS", &value)?,
                    None => true,
                };

                StoreConfig::Postgres {
                    database_url,
                    max_connections,
                    run_migrations,
                }
            }
            "memory" => StoreConfig::Memory,
            other => {
                return Err(anyhow!(
                    "STORE_BACKEND must be 'postgres' or 'memory', got '{other}'"
                ));
            }
        };

        let session = match var("SESSION_BACKEND").as_deref().unwrap_or("grpc") {
            "grpc" => SessionConfig::Grpc {
                addr: var("SESSION_SERVICE_ADDR")
                    .unwrap_or_else(|| "http://127.0.0.1:8081".to_string()),
            },
            "redis" => SessionConfig::Redis {
                url: var("REDIS_URL").context("Missing environment variable: REDIS_URL")?,
            },
            "memory" => SessionConfig::Memory,
            other => {
                return Err(anyhow!(
                    "SESSION_BACKEND must be 'grpc', 'redis' or 'memory', got '{other}'"
                ));
            }
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);
        if cors_allowed_origins.iter().any(|origin| origin == "*") {
            return Err(anyhow!(
                "CORS_ALLOWED_ORIGINS cannot contain '*', credentialed requests need explicit origins"
            ));
        }

        Ok(Self {
            port,
            session_secret,
            store,
            session,
            cors_allowed_origins,
            otel_endpoint: var("OTEL_ENDPOINT"),
            log_dir: var("LOG_DIR"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn defaults_to_postgres_and_grpc() {
        let config = Config::from_lookup(lookup(&[
            ("SESSION_SECRET", SECRET),
            ("DATABASE_URL", "postgres://localhost/marketplace"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.store,
            StoreConfig::Postgres {
                database_url: "postgres://localhost/marketplace".into(),
                max_connections: 5,
                run_migrations: true,
            }
        );
        assert_eq!(
            config.session,
            SessionConfig::Grpc {
                addr: "http://127.0.0.1:8081".into()
            }
        );
        assert_eq!(config.cors_allowed_origins, vec![DEFAULT_CORS_ORIGIN]);
        assert!(config.otel_endpoint.is_none());
    }

    #[test]
    fn memory_backends_need_no_database() {
        let config = Config::from_lookup(lookup(&[
            ("SESSION_SECRET", SECRET),
            ("STORE_BACKEND", "memory"),
            ("SESSION_BACKEND", "memory"),
            ("PORT", "9000"),
            (
                "CORS_ALLOWED_ORIGINS",
                "http://localhost:3000, https://shop.example.org",
            ),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.store, StoreConfig::Memory);
        assert_eq!(config.session, SessionConfig::Memory);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "https://shop.example.org"]
        );
    }

    #[test]
    fn rejects_short_secret() {
        let err = Config::from_lookup(lookup(&[
            ("SESSION_SECRET", "too-short"),
            ("STORE_BACKEND", "memory"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("SESSION_SECRET"));
    }

    #[test]
    fn redis_backend_requires_url() {
        let result = Config::from_lookup(lookup(&[
            ("SESSION_SECRET", SECRET),
            ("STORE_BACKEND", "memory"),
            ("SESSION_BACKEND", "redis"),
        ]));

        assert!(result.is_err());
    }

    #[test]
    fn rejects_invalid_run_migrations() {
        let result = Config::from_lookup(lookup(&[
            ("SESSION_SECRET", SECRET),
            ("DATABASE_URL", "postgres://localhost/marketplace"),
            ("RUN_MIGRATIONS", "sometimes"),
        ]));

        assert!(result.is_err());
    }

    #[test]
    fn rejects_wildcard_cors_origin() {
        let err = Config::from_lookup(lookup(&[
            ("SESSION_SECRET", SECRET),
            ("STORE_BACKEND", "memory"),
            ("CORS_ALLOWED_ORIGINS", "https://shop.example.org, *"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("CORS_ALLOWED_ORIGINS"));
    }
}
