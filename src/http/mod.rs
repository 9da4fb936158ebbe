//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Protocolo HTTP/1.0 implementado a mano: parsing incremental de requests
//! y serialización de responses.
//!
//! ## Especificación HTTP/1.0
//!
//! El protocolo HTTP/1.0 (RFC 1945) es más simple que HTTP/1.1:
//! - No requiere el header `Host`
//! - No tiene chunked transfer encoding
//! - Una conexión, un request: el servidor cierra después de responder
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200\r\n
//! Server: http_site/0.1\r\n
//! Content-Type: text/html\r\n
//! \r\n
//! <body>
//! ```
//!
//! La línea de estado lleva solo el código numérico, sin reason phrase.

pub mod method;    // Verbos soportados
pub mod params;    // Mapa clave/valor con orden de inserción
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use method::Method;
pub use params::ParamMap;
pub use request::{Request, RequestParser};
pub use response::Response;
pub use status::StatusCode;
