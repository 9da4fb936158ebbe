//! # Métodos HTTP
//! src/http/method.rs
//!
//! Los ocho verbos que acepta el framework. Cualquier otro token en la
//! request line es un `InvalidMethod`.

use crate::error::{Error, Result};

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    OPTIONS,
    HEAD,
    TRACE,
    CONNECT,
}

impl Method {
    /// Todos los métodos, en el orden en que se listan en la documentación
    pub const ALL: [Method; 8] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
        Method::HEAD,
        Method::TRACE,
        Method::CONNECT,
    ];

    /// Parsea un método desde el primer token de la request line
    ///
    /// La comparación no distingue mayúsculas de minúsculas.
    ///
    /// # Ejemplo
    /// ```
    /// use http_site::http::Method;
    ///
    /// assert_eq!(Method::parse(b"get").unwrap(), Method::GET);
    /// assert!(Method::parse(b"FOO").is_err());
    /// ```
    pub fn parse(token: &[u8]) -> Result<Self> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str().as_bytes().eq_ignore_ascii_case(token))
            .ok_or_else(|| Error::InvalidMethod(String::from_utf8_lossy(token).into_owned()))
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::HEAD => "HEAD",
            Method::TRACE => "TRACE",
            Method::CONNECT => "CONNECT",
        }
    }

    /// Prefijo con el que se construye el nombre de una ruta (`get_`, `post_`...)
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Method::GET => "get_",
            Method::POST => "post_",
            Method::PUT => "put_",
            Method::DELETE => "delete_",
            Method::OPTIONS => "options_",
            Method::HEAD => "head_",
            Method::TRACE => "trace_",
            Method::CONNECT => "connect_",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
