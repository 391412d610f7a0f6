use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use rolegraph_core::AppError;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackendConfig {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

impl StorageBackendConfig {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres { .. } => "postgres",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub storage: StorageBackendConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(env::args().nth(1).as_deref(), |name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        command: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let migrate_only = command == Some("migrate");

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match lookup("API_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            None => 8000,
        };

        let storage = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "memory".to_owned())
            .as_str()
        {
            "memory" => StorageBackendConfig::Memory,
            "postgres" => {
                let database_url = required_non_empty(&lookup, "DATABASE_URL")?;
                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(value) => value.parse::<u32>().map_err(|error| {
                        AppError::Validation(format!("invalid DATABASE_MAX_CONNECTIONS: {error}"))
                    })?,
                    None => DEFAULT_DATABASE_MAX_CONNECTIONS,
                };
                StorageBackendConfig::Postgres {
                    database_url,
                    max_connections,
                }
            }
            other => {
                return Err(AppError::Validation(format!(
                    "STORAGE_BACKEND must be either 'memory' or 'postgres', got '{other}'"
                )));
            }
        };

        if migrate_only && storage == StorageBackendConfig::Memory {
            return Err(AppError::Validation(
                "migrate requires STORAGE_BACKEND=postgres".to_owned(),
            ));
        }

        Ok(Self {
            migrate_only,
            frontend_url,
            api_host,
            api_port,
            storage,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rolegraph_core::AppError;

    use super::{ApiConfig, StorageBackendConfig};

    fn load(command: Option<&str>, vars: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(command, |name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_in_memory_storage_on_port_8000() {
        let config = load(None, &[]);

        let Ok(config) = config else {
            panic!("defaults should load");
        };
        assert_eq!(config.storage, StorageBackendConfig::Memory);
        assert_eq!(config.api_port, 8000);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert!(!config.migrate_only);
        assert_eq!(
            config.socket_address().map(|address| address.to_string()).ok(),
            Some("127.0.0.1:8000".to_owned())
        );
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let missing = load(None, &[("STORAGE_BACKEND", "postgres")]);
        let configured = load(
            None,
            &[
                ("STORAGE_BACKEND", "postgres"),
                ("DATABASE_URL", "postgres://localhost/rolegraph"),
                ("DATABASE_MAX_CONNECTIONS", "4"),
            ],
        );

        assert!(matches!(missing, Err(AppError::Validation(_))));
        assert_eq!(
            configured.map(|config| config.storage).ok(),
            Some(StorageBackendConfig::Postgres {
                database_url: "postgres://localhost/rolegraph".to_owned(),
                max_connections: 4,
            })
        );
    }

    #[test]
    fn rejects_unknown_backend_and_bad_port() {
        assert!(matches!(
            load(None, &[("STORAGE_BACKEND", "mongo")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(None, &[("API_PORT", "eighty")]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn migrate_command_needs_postgres() {
        assert!(matches!(
            load(Some("migrate"), &[]),
            Err(AppError::Validation(_))
        ));
        assert!(
            load(
                Some("migrate"),
                &[
                    ("STORAGE_BACKEND", "postgres"),
                    ("DATABASE_URL", "postgres://localhost/rolegraph"),
                ],
            )
            .is_ok_and(|config| config.migrate_only)
        );
    }
}
