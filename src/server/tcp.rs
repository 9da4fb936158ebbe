//! # Servidor TCP Secuencial
//! src/server/tcp.rs
//!
//! Loop de conexiones: acepta una conexión, la atiende completa y recién
//! entonces acepta la siguiente. No hay threads por conexión ni keep-alive.
//!
//! ```text
//! accept ──▶ parse ──▶ dispatch ──▶ write ──▶ close ──▶ arena.reset()
//!                └──────────┴──▶ error ──▶ página de error (o cerrar)
//! ```
//!
//! El token de [`Shutdown`] se revisa entre conexiones; un request que ya
//! se está atendiendo termina normalmente.

use super::{Dispatcher, RequestArena, Shutdown};
use crate::error::{Error, Result};
use crate::http::{RequestParser, Response};
use crate::site::Site;
use std::io::{BufReader, Read};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, Shutdown as SocketShutdown, SocketAddr, TcpListener, TcpStream};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Máximo de bytes sin leer que se descartan antes de cerrar
const DRAIN_LIMIT: u64 = 64 * 1024;

/// Cuánto se espera al peer mientras se descarta lo que no se leyó
const DRAIN_TIMEOUT: Duration = Duration::from_millis(200);

/// Servidor HTTP/1.0 ligado a un puerto
pub struct Server {
    site: Site,
    listener: TcpListener,
    local_addr: SocketAddr,
    shutdown: Shutdown,
}

impl Server {
    /// Abre el listener del sitio
    ///
    /// Es la única falla fatal para el proceso: cualquier error posterior se
    /// resuelve conexión por conexión.
    pub fn bind(site: Site) -> Result<Self> {
        let address = site.address();
        info!(%address, "starting server");

        let listener = TcpListener::bind(&address).map_err(|source| {
            error!(%address, error = %source, "unable to bind");
            Error::Bind {
                address: address.clone(),
                source,
            }
        })?;
        let local_addr = listener.local_addr()?;

        let shutdown = Shutdown::new();
        shutdown.arm(wake_address(local_addr));

        info!(%local_addr, routes = site.router().len(), "server listening, one connection at a time");

        Ok(Self {
            site,
            listener,
            local_addr,
            shutdown,
        })
    }

    /// Reemplaza el token de apagado por uno creado afuera (ej: por `main`)
    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        shutdown.arm(wake_address(self.local_addr));
        self.shutdown = shutdown;
        self
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Token para detener el loop desde otro thread
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Loop de conexiones; bloquea hasta que se active el `Shutdown`
    pub fn run(&self) -> Result<()> {
        let mut arena = RequestArena::with_capacity(self.site.limits().arena_bytes);

        while !self.shutdown.is_triggered() {
            let (stream, peer) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                    continue;
                }
            };

            // La conexión que despierta al accept no es un cliente
            if self.shutdown.is_triggered() {
                break;
            }

            debug!(%peer, "connection accepted");
            if let Err(e) = self.handle_connection(&stream, &arena) {
                debug!(%peer, error = %e, "connection closed without response");
            }

            // Pase lo que pase con el handler
            arena.reset();
        }

        info!("server stopped");
        Ok(())
    }

    /// Atiende un request completo sobre `stream`
    ///
    /// Los errores con status conocido se responden con una página de error
    /// y cuentan como atendidos. Los demás se retornan y la conexión se
    /// cierra sin escribir nada.
    fn handle_connection(&self, stream: &TcpStream, arena: &RequestArena) -> Result<()> {
        let start = Instant::now();
        let limits = self.site.limits();
        stream.set_read_timeout(limits.read_timeout)?;

        let served = RequestParser::new(BufReader::new(stream), arena, limits)
            .parse()
            .and_then(|mut request| {
                let response = Dispatcher::new(self.site.router()).dispatch(&mut request, arena)?;
                info!(
                    method = %request.method(),
                    url = request.url(),
                    status = response.status(),
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "request served"
                );
                Ok(response)
            });

        let (response, rejected) = match served {
            Ok(response) => (response, false),
            Err(e) => match e.status_code() {
                Some(status) => {
                    warn!(error = %e, status = status.as_u16(), "request rejected");
                    (Response::error(status, &e.to_string()), true)
                }
                None => return Err(e),
            },
        };

        let mut writer = stream;
        response.write_to(&mut writer)?;
        if let Err(e) = stream.shutdown(SocketShutdown::Write) {
            debug!(error = %e, "write half already closed");
        }

        // Con bytes sin leer el close manda RST
        if rejected {
            drain(stream);
        }
        Ok(())
    }
}

/// Descarta hasta `DRAIN_LIMIT` bytes o hasta que el peer cierre
fn drain(stream: &TcpStream) {
    if stream.set_read_timeout(Some(DRAIN_TIMEOUT)).is_err() {
        return;
    }
    match std::io::copy(&mut stream.take(DRAIN_LIMIT), &mut std::io::sink()) {
        Ok(discarded) => debug!(discarded, "unread request bytes discarded"),
        Err(e) => debug!(error = %e, "drain stopped"),
    }
}

/// Dirección a la que conectarse para despertar el `accept`
///
/// Un listener en `0.0.0.0` o `::` se despierta por loopback.
fn wake_address(local_addr: SocketAddr) -> SocketAddr {
    let ip = match local_addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, local_addr.port())
}
