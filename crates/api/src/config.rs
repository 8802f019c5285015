/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3100`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for the pool to close after the listener stops
    /// (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Rows per batch for the chunked author scan (default: `100`).
    pub scan_chunk_size: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3100`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `SCAN_CHUNK_SIZE`      | `100`                      |
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3100".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = lookup("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let scan_chunk_size: usize = lookup("SCAN_CHUNK_SIZE")
            .unwrap_or_else(|| "100".into())
            .parse()
            .expect("SCAN_CHUNK_SIZE must be a valid usize");
        assert!(scan_chunk_size > 0, "SCAN_CHUNK_SIZE must be greater than zero");

        Self {
            host,
            port,
            request_timeout_secs,
            shutdown_timeout_secs,
            scan_chunk_size,
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `DATABASE_URL`, required.
    pub url: String,
    /// `DB_MAX_CONNECTIONS` (default: `100`).
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url = lookup("DATABASE_URL").expect("DATABASE_URL must be set");
        let max_connections: u32 = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "100".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");
        Self {
            url,
            max_connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3100);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert_eq!(config.scan_chunk_size, 100);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("SCAN_CHUNK_SIZE", "25"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.scan_chunk_size, 25);
    }

    #[test]
    #[should_panic(expected = "SCAN_CHUNK_SIZE must be greater than zero")]
    fn zero_chunk_size_is_rejected() {
        ServerConfig::from_lookup(lookup_from(&[("SCAN_CHUNK_SIZE", "0")]));
    }

    #[test]
    fn database_pool_size_defaults_to_100() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/authvid",
        )]));
        assert_eq!(config.url, "postgres://localhost/authvid");
        assert_eq!(config.max_connections, 100);
    }
}
