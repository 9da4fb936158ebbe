//! # Tabla de Rutas
//! src/router/mod.rs
//!
//! Mapea (método, plantilla de path) a handlers.
//!
//! ## Plantillas
//!
//! ```text
//! /                  → solo URLs sin segmentos
//! /:wine/:bottle     → dos segmentos cualesquiera, se capturan como params
//! /cellar/*/label    → el segmento del medio puede ser cualquier cosa
//! ```
//!
//! ## Reglas de matching
//!
//! 1. El método debe ser el mismo.
//! 2. La cantidad de segmentos debe ser exactamente la misma.
//! 3. Cada segmento de la plantilla es `*`, empieza con `:` o es igual byte
//!    a byte al segmento del URL.
//!
//! Se recorre la tabla en orden de registro y gana la **primera** ruta que
//! cumple. No hay ranking por especificidad: si `/:x` se registró antes que
//! `/fixed`, un GET a `/fixed` lo atiende `/:x`.

pub mod segments;

pub use segments::PathSegments;

use crate::error::{Error, Result};
use crate::http::{Method, ParamMap};
use crate::server::Context;
use tracing::{debug, error, info};

/// Tipo de función handler
///
/// Recibe el contexto del request y retorna el código de estado HTTP.
pub type Handler = fn(&mut Context<'_>) -> u16;

/// Clasificación de un segmento de plantilla
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKind<'a> {
    /// `*`: cualquier segmento, no captura
    Wildcard,
    /// `:name`: cualquier segmento, se captura como `name`
    Param(&'a str),
    /// Texto literal
    Literal(&'a str),
}

impl<'a> SegmentKind<'a> {
    fn of(segment: &'a str) -> Self {
        if segment == "*" {
            SegmentKind::Wildcard
        } else if let Some(name) = segment.strip_prefix(':') {
            SegmentKind::Param(name)
        } else {
            SegmentKind::Literal(segment)
        }
    }
}

/// Una ruta registrada; inmutable después del registro
#[derive(Clone)]
pub struct Route {
    method: Method,
    name: String,
    path: String,
    segments: PathSegments,
    handler: Handler,
}

impl Route {
    fn new(method: Method, name: &str, path: &str, handler: Handler) -> Self {
        Self {
            method,
            name: format!("{}{}", method.route_prefix(), name),
            path: path.to_string(),
            segments: PathSegments::parse(path, '/'),
            handler,
        }
    }

    /// Verifica si la ruta atiende `method` + segmentos del URL
    pub fn matches<S: AsRef<str>>(&self, method: Method, url_segments: &[S]) -> bool {
        if method != self.method || self.segments.len() != url_segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(url_segments)
            .all(|(template, actual)| match SegmentKind::of(template) {
                SegmentKind::Wildcard | SegmentKind::Param(_) => true,
                SegmentKind::Literal(literal) => literal == actual.as_ref(),
            })
    }

    /// Copia los segmentos `:name` del URL al mapa de parámetros
    ///
    /// Los `*` y los literales no agregan nada. Retorna `false` si el mapa
    /// no pudo crecer.
    pub fn bind_params<S: AsRef<str>>(&self, url_segments: &[S], params: &mut ParamMap) -> bool {
        for (template, actual) in self.segments.iter().zip(url_segments) {
            if let SegmentKind::Param(name) = SegmentKind::of(template) {
                if !params.add(name, actual.as_ref()) {
                    return false;
                }
            }
        }
        true
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Nombre con prefijo del verbo (ej: `get_amor`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plantilla tal como se registró
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &PathSegments {
        &self.segments
    }

    pub fn handler(&self) -> Handler {
        self.handler
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Tabla de rutas en orden de registro
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Crea un router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra una ruta al final de la tabla
    ///
    /// El nombre efectivo es el prefijo del verbo más `name`; si ya existe
    /// la tabla queda igual y se retorna `DuplicateRouteName`.
    ///
    /// # Ejemplo
    /// ```
    /// use http_site::router::Router;
    /// use http_site::http::Method;
    /// use http_site::server::Context;
    ///
    /// fn sway(_ctx: &mut Context<'_>) -> u16 {
    ///     200
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register(Method::GET, "sway", "/:wine/:bottle", sway).unwrap();
    ///
    /// assert!(router.register(Method::GET, "sway", "/other", sway).is_err());
    /// assert!(router.register(Method::POST, "sway", "/", sway).is_ok());
    /// assert_eq!(router.len(), 2);
    /// ```
    pub fn register(&mut self, method: Method, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        let route = Route::new(method, name, path, handler);

        if self.routes.iter().any(|existing| existing.name == route.name) {
            error!(route = %route.name, path, "{} unable to bind route, name already taken", method);
            return Err(Error::DuplicateRouteName { name: route.name });
        }

        if self.routes.try_reserve(1).is_err() {
            return Err(Error::AllocationFailure(format!("route table full at {}", self.routes.len())));
        }

        info!(route = %route.name, %method, path, "route registered");
        self.routes.push(route);
        Ok(&self.routes[self.routes.len() - 1])
    }

    /// Primera ruta que atiende `method` + segmentos, en orden de registro
    pub fn find<S: AsRef<str>>(&self, method: Method, url_segments: &[S]) -> Option<&Route> {
        let found = self.routes.iter().find(|route| route.matches(method, url_segments));
        if let Some(route) = found {
            debug!(route = route.name(), "route matched");
        }
        found
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}
