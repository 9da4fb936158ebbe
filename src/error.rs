//! # Errores del Framework
//! src/error.rs
//!
//! Taxonomía única de errores. Cada variante sabe qué status debe ver el
//! cliente (si es que debe ver alguno):
//!
//! | Error                  | Respuesta en el socket      |
//! |------------------------|-----------------------------|
//! | `DuplicateRouteName`   | ninguna (error de arranque) |
//! | `InvalidMethod`        | 400                         |
//! | `TruncatedBody`        | 400                         |
//! | `InvalidContentLength` | 400                         |
//! | `LineTooLong`          | 400                         |
//! | `BodyTooLarge`         | 413                         |
//! | `RouteNotFound`        | 404                         |
//! | `HandlerPanicked`      | 500                         |
//! | `EmptyRequest`         | ninguna, se cierra          |
//! | `AllocationFailure`    | ninguna, se aborta conexión |

use crate::http::{Method, StatusCode};
use thiserror::Error;

/// Resultado con el error del framework
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Ya existe una ruta con ese nombre (prefijo del verbo incluido)
    #[error("duplicate route name: {name}")]
    DuplicateRouteName { name: String },

    /// El primer token de la request line no es un verbo soportado
    #[error("invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// El peer cerró antes de mandar todo lo que prometió `Content-Length`
    #[error("truncated body: expected {expected} bytes, received {received}")]
    TruncatedBody { expected: usize, received: usize },

    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// La request line o un header supera `Limits::max_line_bytes`
    #[error("line exceeds limit of {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("body of {length} bytes exceeds limit of {limit}")]
    BodyTooLarge { length: usize, limit: usize },

    /// El peer cerró sin mandar nada
    #[error("empty request")]
    EmptyRequest,

    #[error("route not found: {method} {url}")]
    RouteNotFound { method: Method, url: String },

    #[error("handler for route {route} panicked")]
    HandlerPanicked { route: String },

    /// No se pudo crecer un buffer o un mapa
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    #[error("unable to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Status HTTP con el que el loop de conexiones debe responder
    ///
    /// `None` significa cerrar la conexión sin escribir nada.
    ///
    /// # Ejemplo
    /// ```
    /// use http_site::error::Error;
    /// use http_site::http::StatusCode;
    ///
    /// let err = Error::InvalidMethod("FOO".to_string());
    /// assert_eq!(err.status_code(), Some(StatusCode::BadRequest));
    /// assert_eq!(Error::EmptyRequest.status_code(), None);
    /// ```
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Error::InvalidMethod(_)
            | Error::TruncatedBody { .. }
            | Error::InvalidContentLength(_)
            | Error::LineTooLong { .. } => Some(StatusCode::BadRequest),
            Error::BodyTooLarge { .. } => Some(StatusCode::PayloadTooLarge),
            Error::RouteNotFound { .. } => Some(StatusCode::NotFound),
            Error::HandlerPanicked { .. } => Some(StatusCode::InternalServerError),
            Error::DuplicateRouteName { .. }
            | Error::EmptyRequest
            | Error::AllocationFailure(_)
            | Error::Bind { .. }
            | Error::InvalidConfig(_)
            | Error::Io(_) => None,
        }
    }
}
