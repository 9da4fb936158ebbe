//! # Token de Apagado
//! src/server/shutdown.rs
//!
//! Bandera compartida que el loop de conexiones revisa entre un `accept` y
//! el siguiente. Quien la activa (el hilo de señales, un test) no toca el
//! listener: solo marca la bandera y abre una conexión descartable contra la
//! dirección del servidor para despertar el `accept` bloqueado.
//!
//! Un request que ya está en curso termina normalmente.

use std::net::{SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

const WAKE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct Inner {
    triggered: AtomicBool,
    wake_addr: Mutex<Option<SocketAddr>>,
}

/// Token de cancelación clonable
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    inner: Arc<Inner>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pide el apagado; llamadas repetidas no hacen nada
    pub fn trigger(&self) {
        if self.inner.triggered.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("shutdown requested");

        let wake_addr = *self
            .inner
            .wake_addr
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(addr) = wake_addr {
            match TcpStream::connect_timeout(&addr, WAKE_TIMEOUT) {
                Ok(_) => debug!(%addr, "accept loop woken"),
                Err(e) => debug!(%addr, error = %e, "wake connection failed"),
            }
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::SeqCst)
    }

    /// Registra la dirección a la que conectarse para despertar el `accept`
    pub(crate) fn arm(&self, addr: SocketAddr) {
        *self
            .inner
            .wake_addr
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(addr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_starts_untriggered() {
        assert!(!Shutdown::new().is_triggered());
    }

    #[test]
    fn test_clones_share_state() {
        let shutdown = Shutdown::new();
        let other = shutdown.clone();

        other.trigger();
        assert!(shutdown.is_triggered());
    }

    #[test]
    fn test_trigger_is_idempotent() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();
        assert!(shutdown.is_triggered());
    }

    #[test]
    fn test_trigger_wakes_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let shutdown = Shutdown::new();
        shutdown.arm(listener.local_addr().unwrap());

        shutdown.trigger();

        // La conexión de despertar ya está en la cola del listener
        let (_stream, peer) = listener.accept().unwrap();
        assert!(peer.ip().is_loopback());
    }
}
