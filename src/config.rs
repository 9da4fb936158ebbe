//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del binario con soporte para argumentos CLI y variables de
//! entorno. La librería solo necesita [`Limits`]; el resto (host, puerto,
//! nivel de log) lo consume `main`.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http_site --port 3032 --max-body-bytes 65536 --read-timeout-ms 5000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=3032 HTTP_HOST=0.0.0.0 LOG_LEVEL=debug ./http_site
//! ```

use crate::error::{Error, Result};
use clap::Parser;
use std::time::Duration;
use tracing::info;

/// Timeout de lectura por defecto (milisegundos)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 30_000;

/// Límite por defecto del body de un request
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Largo máximo de la request line o de un header
pub const DEFAULT_MAX_LINE_BYTES: usize = 8 * 1024;

/// Tamaño inicial de la arena por request
pub const DEFAULT_ARENA_BYTES: usize = 16 * 1024;

/// Configuración del servidor HTTP/1.0
#[derive(Debug, Clone, Parser)]
#[command(name = "http_site")]
#[command(about = "Framework HTTP/1.0 embebible con rutas por plantilla")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = puerto efímero)
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Timeout de lectura del socket en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value_t = DEFAULT_READ_TIMEOUT_MS, env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Máximo `Content-Length` aceptado
    #[arg(long = "max-body-bytes", default_value_t = DEFAULT_MAX_BODY_BYTES, env = "MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    /// Largo máximo de una línea (request line o header)
    #[arg(long = "max-line-bytes", default_value_t = DEFAULT_MAX_LINE_BYTES, env = "MAX_LINE_BYTES")]
    pub max_line_bytes: usize,

    /// Tamaño inicial de la arena que se reutiliza entre requests
    #[arg(long = "arena-bytes", default_value_t = DEFAULT_ARENA_BYTES, env = "ARENA_BYTES")]
    pub arena_bytes: usize,

    /// Filtro de logging por defecto (si `RUST_LOG` no está definido)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

/// Límites que aplica el loop de conexiones a cada request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Timeout de lectura del socket (`None` = bloquear indefinidamente)
    pub read_timeout: Option<Duration>,

    /// Máximo body aceptado
    pub max_body_bytes: usize,

    /// Máximo largo de una línea; acota lo que crece la arena
    pub max_line_bytes: usize,

    /// Capacidad inicial de la arena por request
    pub arena_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            read_timeout: Some(Duration::from_millis(DEFAULT_READ_TIMEOUT_MS)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            arena_bytes: DEFAULT_ARENA_BYTES,
        }
    }
}

impl Config {
    /// Crea la configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_site::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Límites derivados de la configuración
    pub fn limits(&self) -> Limits {
        Limits {
            read_timeout: match self.read_timeout_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
            max_body_bytes: self.max_body_bytes,
            max_line_bytes: self.max_line_bytes,
            arena_bytes: self.arena_bytes,
        }
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("host must not be empty".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(Error::InvalidConfig("max body bytes must be >= 1".to_string()));
        }
        if self.max_line_bytes == 0 {
            return Err(Error::InvalidConfig("max line bytes must be >= 1".to_string()));
        }
        if self.arena_bytes == 0 {
            return Err(Error::InvalidConfig("arena bytes must be >= 1".to_string()));
        }
        Ok(())
    }

    /// Registra un resumen de la configuración efectiva
    pub fn print_summary(&self) {
        info!(address = %self.address(), "network");
        match self.read_timeout_ms {
            0 => info!("read timeout: disabled"),
            ms => info!(read_timeout_ms = ms, "read timeout"),
        }
        info!(
            max_body_bytes = self.max_body_bytes,
            max_line_bytes = self.max_line_bytes,
            arena_bytes = self.arena_bytes,
            "request limits"
        );
        info!(log_level = %self.log_level, "logging");
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            arena_bytes: DEFAULT_ARENA_BYTES,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.arena_bytes, 16 * 1024);
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3032;
        assert_eq!(config.address(), "0.0.0.0:3032");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("host"));
    }

    #[test]
    fn test_validate_zero_body_limit() {
        let mut config = Config::default();
        config.max_body_bytes = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(msg)) if msg.contains("body")));
    }

    #[test]
    fn test_validate_zero_line_limit() {
        let mut config = Config::default();
        config.max_line_bytes = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(msg)) if msg.contains("line")));
    }

    #[test]
    fn test_parse_max_line_bytes() {
        let config = Config::parse_from(["http_site", "--max-line-bytes", "256"]);
        assert_eq!(config.limits().max_line_bytes, 256);
    }

    #[test]
    fn test_validate_zero_arena() {
        let mut config = Config::default();
        config.arena_bytes = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(msg)) if msg.contains("arena")));
    }

    #[test]
    fn test_limits_from_config() {
        let mut config = Config::default();
        config.read_timeout_ms = 1500;
        config.max_body_bytes = 10;

        let limits = config.limits();
        assert_eq!(limits.read_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(limits.max_body_bytes, 10);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let mut config = Config::default();
        config.read_timeout_ms = 0;
        assert_eq!(config.limits().read_timeout, None);
    }

    #[test]
    fn test_default_limits_match_default_config() {
        assert_eq!(Limits::default(), Config::default().limits());
    }

    #[test]
    fn test_parse_from_args() {
        let config = Config::parse_from(["http_site", "--port", "3032", "--host", "0.0.0.0"]);
        assert_eq!(config.port, 3032);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_config_print_summary() {
        // No debe hacer panic aunque no haya subscriber instalado
        Config::default().print_summary();
    }
}
