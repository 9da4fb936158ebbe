//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! El handler va llenando la respuesta (body + headers) y el dispatcher la
//! serializa al socket al final.
//!
//! ## Formato en el socket
//!
//! ```text
//! HTTP/1.0 200\r\n
//! Content-Type: text/html\r\n
//! Dino-Type: Wine\r\n
//! \r\n
//! <body>
//! ```
//!
//! La status line lleva solo el código numérico y los headers salen en
//! orden de inserción. No se agregan headers automáticos a las respuestas
//! de los handlers.

use super::{ParamMap, StatusCode};
use std::fmt;
use std::io::Write;
use tracing::warn;

/// Header `Server` de las páginas de error del framework
pub const SERVER_NAME: &str = "http_site/0.1";

/// Respuesta HTTP/1.0
#[derive(Debug, Clone)]
pub struct Response {
    /// Código que devolvió el handler (cualquier `u16`)
    status: u16,

    /// Headers en orden de inserción, sin duplicados
    headers: ParamMap,

    /// Body crudo
    body: Vec<u8>,

    /// Se marca si alguna escritura no pudo crecer el buffer
    overflowed: bool,
}

impl Response {
    /// Crea una respuesta vacía con el status indicado
    ///
    /// # Ejemplo
    /// ```
    /// use http_site::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok);
    /// assert_eq!(response.status(), 200);
    /// ```
    pub fn new(status: impl Into<u16>) -> Self {
        Self {
            status: status.into(),
            headers: ParamMap::new(),
            body: Vec::new(),
            overflowed: false,
        }
    }

    /// Página de error que el framework escribe para 400/404/413/500
    ///
    /// `message` puede traer bytes del cliente (URL, método) y se escapa
    /// antes de meterlo en el HTML.
    pub fn error(status: StatusCode, message: &str) -> Self {
        let mut response = Self::new(status);
        response.set_header("Server", SERVER_NAME);
        response.set_header("Content-Type", "text/html");
        response.send_formatted(format_args!(
            "<HTML><TITLE>{}</TITLE>\r\n<BODY><P>{}\r\n</BODY></HTML>\r\n",
            status.reason_phrase(),
            escape_html(message)
        ));
        response
    }

    /// Agrega bytes al final del body
    ///
    /// Si el buffer no puede crecer, la respuesta queda marcada como
    /// desbordada y el dispatcher aborta la conexión.
    pub fn send(&mut self, data: &[u8]) {
        if self.overflowed {
            return;
        }
        if self.body.try_reserve(data.len()).is_err() {
            warn!(requested = data.len(), "response body could not grow");
            self.overflowed = true;
            return;
        }
        self.body.extend_from_slice(data);
    }

    /// Agrega texto formateado al body
    ///
    /// # Ejemplo
    /// ```
    /// use http_site::http::{Response, StatusCode};
    ///
    /// let mut response = Response::new(StatusCode::Ok);
    /// response.send_formatted(format_args!("{}:{}\n", "wine", "merlot"));
    /// assert_eq!(response.body(), b"wine:merlot\n");
    /// ```
    pub fn send_formatted(&mut self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(literal) => self.send(literal.as_bytes()),
            None => self.send(args.to_string().as_bytes()),
        }
    }

    /// Establece un header; si ya existe se sobrescribe
    ///
    /// Las claves vacías se ignoran.
    pub fn set_header(&mut self, key: &str, value: &str) {
        if key.is_empty() {
            warn!(value, "ignoring response header with empty key");
            return;
        }
        if !self.headers.add(key, value) {
            warn!(key, "response header map could not grow");
            self.overflowed = true;
        }
    }

    pub fn set_status(&mut self, status: impl Into<u16>) {
        self.status = status.into();
    }

    /// Serializa la respuesta completa
    ///
    /// # Ejemplo
    /// ```
    /// use http_site::http::{Response, StatusCode};
    ///
    /// let mut response = Response::new(StatusCode::Ok);
    /// response.set_header("X", "1");
    /// response.send(b"abc");
    ///
    /// assert_eq!(response.to_bytes(), b"HTTP/1.0 200\r\nX: 1\r\n\r\nabc");
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.body.len() + 64);
        // Escribir en un Vec no falla
        let _ = self.write_to(&mut result);
        result
    }

    /// Escribe la respuesta en cualquier destino (socket, buffer...)
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        // 1. Status line
        write!(out, "HTTP/1.0 {}\r\n", self.status)?;

        // 2. Headers en orden de inserción
        for (name, value) in self.headers.iter() {
            write!(out, "{}: {}\r\n", name, value)?;
        }

        // 3. Línea vacía + body
        out.write_all(b"\r\n")?;
        out.write_all(&self.body)?;
        out.flush()
    }

    /// Código de estado numérico
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &ParamMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// `true` si alguna escritura del handler no pudo reservar memoria
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}

/// Escapa `& < > " '` para insertar texto en HTML
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl Default for Response {
    fn default() -> Self {
        Self::new(StatusCode::Ok)
    }
}

impl fmt::Write for Response {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send(s.as_bytes());
        if self.overflowed {
            Err(fmt::Error)
        } else {
            Ok(())
        }
    }
}
