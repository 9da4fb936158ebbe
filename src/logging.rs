//! # Logging
//! src/logging.rs
//!
//! Subscriber de `tracing` para el binario. `RUST_LOG` tiene prioridad; si
//! no está definido se usa el nivel de la configuración.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Instala el subscriber global
///
/// Llamarlo más de una vez no falla: el segundo intento se ignora.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init("debug");
        init("info");
        tracing::info!("logging ready");
    }
}
