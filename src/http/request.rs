//! # Parsing de Requests HTTP/1.0
//! src/http/request.rs
//!
//! Parser incremental que lee directamente del socket (cualquier `BufRead`).
//!
//! ## Máquina de estados
//!
//! ```text
//! MethodLine ──▶ Headers ──▶ Body ──▶ Done
//!     │             │          │
//!     └─────────────┴──────────┴──▶ Error
//! ```
//!
//! ## Formato aceptado
//!
//! ```text
//! GET /merlot/2019?glass=1&cold HTTP/1.0\r\n
//! Host: localhost:8080\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! Query string y headers terminan en **el mismo** mapa de parámetros: un
//! header `glass: 2` pisa al `?glass=1` del URL. Los handlers dependen de ese
//! espacio de nombres compartido, así que no se separan.

use super::{Method, ParamMap};
use crate::config::Limits;
use crate::error::{Error, Result};
use crate::server::RequestArena;
use bumpalo::collections::Vec as BumpVec;
use std::io::{BufRead, Read};
use tracing::{info, warn};

/// Request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Path sin query string (ej: "/merlot/2019")
    url: String,

    /// Query params, headers y, después del dispatch, params del path
    params: ParamMap,

    /// Body (solo si hubo `Content-Length`)
    body: Vec<u8>,

    /// Valor de `Content-Length` (0 si no vino)
    content_length: usize,
}

/// Estado del parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    MethodLine,
    Headers,
    Body,
    Done,
}

/// Parser de un request sobre un stream de bytes
pub struct RequestParser<'a, R> {
    reader: R,
    arena: &'a RequestArena,
    limits: Limits,
    state: ParseState,
}

impl<'a, R: BufRead> RequestParser<'a, R> {
    pub fn new(reader: R, arena: &'a RequestArena, limits: Limits) -> Self {
        Self {
            reader,
            arena,
            limits,
            state: ParseState::MethodLine,
        }
    }

    /// Corre la máquina de estados hasta `Done` o hasta el primer error
    pub fn parse(mut self) -> Result<Request> {
        let arena = self.arena;
        let mut line = arena.line_buffer();
        let mut request = Request {
            method: Method::GET,
            url: String::new(),
            params: ParamMap::with_capacity(32),
            body: Vec::new(),
            content_length: 0,
        };

        loop {
            self.state = match self.state {
                ParseState::MethodLine => {
                    if read_line(&mut self.reader, &mut line, self.limits.max_line_bytes)? == 0 {
                        return Err(Error::EmptyRequest);
                    }
                    parse_method_line(&line, &mut request)?;
                    info!(method = %request.method, url = %request.url, "request line parsed");
                    ParseState::Headers
                }
                ParseState::Headers => {
                    self.parse_headers(&mut line, &mut request)?;
                    ParseState::Body
                }
                ParseState::Body => {
                    self.read_body(&mut request)?;
                    ParseState::Done
                }
                ParseState::Done => return Ok(request),
            };
        }
    }

    /// Lee headers hasta la línea vacía (o EOF)
    fn parse_headers(&mut self, line: &mut BumpVec<'_, u8>, request: &mut Request) -> Result<()> {
        while read_line(&mut self.reader, line, self.limits.max_line_bytes)? > 0 {
            let text = String::from_utf8_lossy(line);
            let (key, value) = match text.split_once(':') {
                Some((key, value)) => (key, value),
                None => (&*text, ""),
            };
            let key = clean_key(key);
            let value = clean_value(value);

            // La línea vacía (o una sin clave) cierra los headers
            if key.is_empty() {
                break;
            }

            if key.eq_ignore_ascii_case("Content-Length") {
                request.content_length = value
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidContentLength(value.to_string()))?;
            }

            if !request.params.add(key, value) {
                return Err(Error::AllocationFailure(format!("header {}", key)));
            }
        }
        Ok(())
    }

    /// Lee exactamente `content_length` bytes
    fn read_body(&mut self, request: &mut Request) -> Result<()> {
        let expected = request.content_length;
        if expected == 0 {
            return Ok(());
        }
        if expected > self.limits.max_body_bytes {
            return Err(Error::BodyTooLarge {
                length: expected,
                limit: self.limits.max_body_bytes,
            });
        }
        if request.body.try_reserve_exact(expected).is_err() {
            return Err(Error::AllocationFailure(format!("request body of {} bytes", expected)));
        }

        let received = (&mut self.reader).take(expected as u64).read_to_end(&mut request.body)?;
        if received < expected {
            warn!(expected, received, "peer closed before sending the full body");
            return Err(Error::TruncatedBody { expected, received });
        }
        Ok(())
    }
}

/// Lee una línea sin el terminador
///
/// Acepta `\r\n`, `\n` o un `\r` suelto como fin de línea. Retorna los bytes
/// consumidos del stream (terminador incluido), así que `0` solo significa
/// EOF y una línea vacía `"\r\n"` retorna 2.
///
/// Una línea de más de `max` bytes es `LineTooLong`; la arena nunca crece
/// más allá de ese límite.
fn read_line<R: BufRead>(reader: &mut R, line: &mut BumpVec<'_, u8>, max: usize) -> Result<usize> {
    line.clear();
    let mut consumed = 0;
    let mut byte = [0u8; 1];

    loop {
        if reader.read(&mut byte)? == 0 {
            return Ok(consumed);
        }
        consumed += 1;

        match byte[0] {
            b'\n' => return Ok(consumed),
            b'\r' => {
                // Mirar el siguiente byte sin consumirlo
                if reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                    consumed += 1;
                }
                return Ok(consumed);
            }
            other => {
                if line.len() >= max {
                    warn!(limit = max, "request line too long");
                    return Err(Error::LineTooLong { limit: max });
                }
                if line.try_reserve(1).is_err() {
                    return Err(Error::AllocationFailure(format!("line of {} bytes", line.len())));
                }
                line.push(other);
            }
        }
    }
}

/// Parsea `METHOD url[?query] [version]`
///
/// La versión HTTP se ignora.
fn parse_method_line(line: &[u8], request: &mut Request) -> Result<()> {
    let token_end = line
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(line.len());
    request.method = Method::parse(&line[..token_end])?;

    // Saltar espacios y tabs
    let rest = &line[token_end..];
    let start = rest
        .iter()
        .position(|b| *b != b' ' && *b != b'\t')
        .unwrap_or(rest.len());
    let rest = &rest[start..];

    let url_end = rest
        .iter()
        .position(|b| matches!(b, b'?' | b' ' | b'\t'))
        .unwrap_or(rest.len());
    request.url = String::from_utf8_lossy(&rest[..url_end]).into_owned();

    if rest.get(url_end) == Some(&b'?') {
        let query = &rest[url_end + 1..];
        let query_end = query
            .iter()
            .position(|b| b.is_ascii_whitespace())
            .unwrap_or(query.len());
        parse_query_string(&String::from_utf8_lossy(&query[..query_end]), &mut request.params)?;
    }

    Ok(())
}

/// Separa `a=1&b&c=x=y` en `{a: 1, b: "", c: "x=y"}`
///
/// Los pedazos vacíos y las claves vacías se descartan. No hay
/// percent-decoding: los valores llegan tal cual al handler.
fn parse_query_string(query: &str, params: &mut ParamMap) -> Result<()> {
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key.is_empty() {
            continue;
        }
        if !params.add(key, value) {
            return Err(Error::AllocationFailure(format!("query param {}", key)));
        }
    }
    Ok(())
}

fn clean_key(key: &str) -> &str {
    key.trim_end_matches(['\r', '\n'])
}

/// Quita CR/LF del final y un único espacio inicial
fn clean_value(value: &str) -> &str {
    let value = value.trim_end_matches(['\r', '\n']);
    value.strip_prefix(' ').unwrap_or(value)
}

impl Request {
    /// Parsea un request completo desde memoria
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_site::http::{Method, Request};
    ///
    /// let raw = b"GET /merlot/2019?glass=1 HTTP/1.0\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.url(), "/merlot/2019");
    /// assert_eq!(request.param("glass"), "1");
    /// assert_eq!(request.param("Host"), "localhost");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self> {
        let arena = RequestArena::default();
        RequestParser::new(buffer, &arena, Limits::default()).parse()
    }

    // === Métodos públicos para acceder a los campos ===

    pub fn method(&self) -> Method {
        self.method
    }

    /// URL sin query string
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Mapa compartido de query params + headers + params del path
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    pub(crate) fn params_mut(&mut self) -> &mut ParamMap {
        &mut self.params
    }

    /// Valor de un parámetro, o `""` si no existe
    pub fn param(&self, key: &str) -> &str {
        self.params.get(key)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body como String (si es UTF-8 válido)
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    pub fn content_length(&self) -> usize {
        self.content_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with_limit(raw: &[u8], max_body_bytes: usize) -> Result<Request> {
        let arena = RequestArena::default();
        let limits = Limits {
            max_body_bytes,
            ..Limits::default()
        };
        RequestParser::new(raw, &arena, limits).parse()
    }

    #[test]
    fn test_parse_simple_get() {
        let request = Request::parse(b"GET / HTTP/1.0\r\n\r\n").unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url(), "/");
        assert!(request.params().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_method_is_case_insensitive() {
        let request = Request::parse(b"delete /bottle HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(request.method(), Method::DELETE);
    }

    #[test]
    fn test_invalid_method() {
        let result = Request::parse(b"FOO / HTTP/1.0\r\n");
        assert!(matches!(result, Err(Error::InvalidMethod(m)) if m == "FOO"));
    }

    #[test]
    fn test_garbage_is_invalid_method() {
        let result = Request::parse(b"\x00\x01\x02\x03garbage");
        assert!(matches!(result, Err(Error::InvalidMethod(_))));
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(Request::parse(b""), Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_blank_first_line_is_invalid_method() {
        assert!(matches!(Request::parse(b"\r\n"), Err(Error::InvalidMethod(_))));
    }

    #[test]
    fn test_query_params() {
        let request = Request::parse(b"GET /wine?color=red&year=2019 HTTP/1.0\r\n\r\n").unwrap();

        assert_eq!(request.url(), "/wine");
        assert_eq!(request.param("color"), "red");
        assert_eq!(request.param("year"), "2019");
        assert_eq!(request.params().count(), 2);
    }

    #[test]
    fn test_query_bare_key_and_extra_equals() {
        let request = Request::parse(b"GET /wine?cold&pair=a=b&&=x HTTP/1.0\r\n\r\n").unwrap();

        assert!(request.params().exists("cold"));
        assert_eq!(request.param("cold"), "");
        assert_eq!(request.param("pair"), "a=b");
        assert_eq!(request.params().count(), 2);
    }

    #[test]
    fn test_no_percent_decoding() {
        let request = Request::parse(b"GET /r?text=hello%20world HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(request.param("text"), "hello%20world");
    }

    #[test]
    fn test_tabs_and_missing_version() {
        let request = Request::parse(b"GET\t\t/merlot\n\n").unwrap();
        assert_eq!(request.url(), "/merlot");
    }

    #[test]
    fn test_headers() {
        let raw = b"GET / HTTP/1.0\r\nHost: localhost:8080\r\nUser-Agent: test\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.param("Host"), "localhost:8080");
        assert_eq!(request.param("User-Agent"), "test");
    }

    #[test]
    fn test_header_value_split_on_first_colon() {
        let request = Request::parse(b"GET / HTTP/1.0\r\nX-Time: 10:30:00\r\n\r\n").unwrap();
        assert_eq!(request.param("X-Time"), "10:30:00");
    }

    #[test]
    fn test_header_trims_only_one_leading_space() {
        let request = Request::parse(b"GET / HTTP/1.0\r\nX-Pad:   padded\r\n\r\n").unwrap();
        assert_eq!(request.param("X-Pad"), "  padded");
    }

    #[test]
    fn test_header_without_colon() {
        let request = Request::parse(b"GET / HTTP/1.0\r\nweird-line\r\n\r\n").unwrap();
        assert!(request.params().exists("weird-line"));
        assert_eq!(request.param("weird-line"), "");
    }

    #[test]
    fn test_headers_share_namespace_with_query() {
        let raw = b"GET /wine?glass=1 HTTP/1.0\r\nglass: 2\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.param("glass"), "2");
        assert_eq!(request.params().count(), 1);
    }

    #[test]
    fn test_bare_lf_line_endings() {
        let request = Request::parse(b"GET /a HTTP/1.0\nHost: x\n\n").unwrap();
        assert_eq!(request.url(), "/a");
        assert_eq!(request.param("Host"), "x");
    }

    #[test]
    fn test_bare_cr_ends_line() {
        let request = Request::parse(b"GET /a HTTP/1.0\rHost: x\r\r").unwrap();
        assert_eq!(request.param("Host"), "x");
    }

    #[test]
    fn test_eof_ends_headers() {
        let request = Request::parse(b"GET /a HTTP/1.0\r\nHost: x").unwrap();
        assert_eq!(request.param("Host"), "x");
    }

    #[test]
    fn test_body_with_content_length() {
        let raw = b"POST / HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.content_length(), 5);
        assert_eq!(request.body(), b"hello");
        assert_eq!(request.body_string().as_deref(), Some("hello"));
    }

    #[test]
    fn test_content_length_case_insensitive() {
        let raw = b"PUT / HTTP/1.0\r\ncontent-length: 3\r\n\r\nabcdef";
        let request = Request::parse(raw).unwrap();

        // Solo se leen los bytes prometidos
        assert_eq!(request.body(), b"abc");
    }

    #[test]
    fn test_binary_body_keeps_crlf() {
        let raw = b"POST / HTTP/1.0\r\nContent-Length: 4\r\n\r\n\r\n\x00\xff";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.body(), b"\r\n\x00\xff");
    }

    #[test]
    fn test_truncated_body() {
        let raw = b"POST / HTTP/1.0\r\nContent-Length: 10\r\n\r\nabc";
        let result = Request::parse(raw);
        assert!(matches!(result, Err(Error::TruncatedBody { expected: 10, received: 3 })));
    }

    #[test]
    fn test_invalid_content_length() {
        let raw = b"POST / HTTP/1.0\r\nContent-Length: lots\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(Error::InvalidContentLength(v)) if v == "lots"));
    }

    #[test]
    fn test_negative_content_length_rejected() {
        let raw = b"POST / HTTP/1.0\r\nContent-Length: -1\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(Error::InvalidContentLength(_))));
    }

    #[test]
    fn test_body_over_limit() {
        let raw = b"POST / HTTP/1.0\r\nContent-Length: 100\r\n\r\n";
        let result = parse_with_limit(raw, 10);
        assert!(matches!(result, Err(Error::BodyTooLarge { length: 100, limit: 10 })));
    }

    #[test]
    fn test_zero_content_length_reads_nothing() {
        let raw = b"POST / HTTP/1.0\r\nContent-Length: 0\r\n\r\nignored";
        let request = Request::parse(raw).unwrap();
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_header_with_empty_key_ends_headers() {
        let request = Request::parse(b"GET / HTTP/1.0\r\nA: 1\r\n: orphan\r\nB: 2\r\n\r\n").unwrap();
        assert_eq!(request.params().count(), 1);
        assert!(!request.params().exists("B"));
    }

    #[test]
    fn test_header_over_line_limit() {
        let arena = RequestArena::with_capacity(1024);
        let limits = Limits {
            max_line_bytes: 64,
            ..Limits::default()
        };
        let mut raw = b"GET / HTTP/1.0\r\nX: ".to_vec();
        raw.extend(std::iter::repeat(b'a').take(1024 * 1024));
        raw.extend_from_slice(b"\r\n\r\n");

        let result = RequestParser::new(raw.as_slice(), &arena, limits).parse();
        assert!(matches!(result, Err(Error::LineTooLong { limit: 64 })));
        assert!(arena.allocated_bytes() < 64 * 1024);
    }

    #[test]
    fn test_request_line_over_limit() {
        let arena = RequestArena::default();
        let limits = Limits {
            max_line_bytes: 16,
            ..Limits::default()
        };
        let raw = b"GET /a/very/long/path/indeed HTTP/1.0\r\n\r\n";

        let result = RequestParser::new(&raw[..], &arena, limits).parse();
        assert!(matches!(result, Err(Error::LineTooLong { .. })));
    }

    #[test]
    fn test_line_exactly_at_limit() {
        let arena = RequestArena::default();
        let limits = Limits {
            max_line_bytes: 14,
            ..Limits::default()
        };
        // "GET / HTTP/1.0" son 14 bytes
        let request = RequestParser::new(&b"GET / HTTP/1.0\r\n\r\n"[..], &arena, limits)
            .parse()
            .unwrap();
        assert_eq!(request.url(), "/");
    }

    #[test]
    fn test_blank_line_not_stored() {
        let request = Request::parse(b"GET / HTTP/1.0\r\nA: 1\r\n\r\n").unwrap();
        assert!(!request.params().exists(""));
        assert_eq!(request.params().count(), 1);
    }
}
