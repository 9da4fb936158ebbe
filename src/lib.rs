//! # HTTP Site
//! src/lib.rs
//!
//! Framework HTTP/1.0 embebible: la aplicación registra handlers sobre
//! plantillas de path (`/`, `/:wine/:bottle`, `/cellar/*/label`) y el
//! framework se encarga del socket.
//!
//! ## Arquitectura
//!
//! - `http`: parsing de requests, responses, status codes y el mapa de parámetros
//! - `router`: tabla de rutas y separación de paths en segmentos
//! - `server`: loop de conexiones, dispatcher, contexto del handler, arena y apagado
//! - `site`: API de registro (`Site::start`, `site.get(...)`, `site.serve()`)
//! - `commands`: aplicación de muestra que usa el binario
//! - `config` / `logging` / `error`: configuración CLI, `tracing` y errores
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_site::server::Context;
//! use http_site::Site;
//!
//! fn amor(ctx: &mut Context<'_>) -> u16 {
//!     ctx.send(b"That's amore!\n");
//!     ctx.set_header("Content-Type", "text/html");
//!     200
//! }
//!
//! let mut site = Site::start("localhost", 3032);
//! site.get("amor", "/", amor).expect("route");
//! site.serve().expect("Error al iniciar servidor");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
pub mod site;

pub use error::{Error, Result};
pub use site::Site;
