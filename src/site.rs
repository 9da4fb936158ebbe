//! # Sitio
//! src/site.rs
//!
//! API de registro que usa la aplicación: se crea el sitio, se le agregan
//! rutas y se lo pone a servir.
//!
//! ```no_run
//! use http_site::server::Context;
//! use http_site::Site;
//!
//! fn sway(ctx: &mut Context<'_>) -> u16 {
//!     let wine = ctx.param("wine").to_string();
//!     ctx.send_formatted(format_args!("wine:{}\n", wine));
//!     200
//! }
//!
//! let mut site = Site::start("localhost", 3032);
//! site.get("sway", "/:wine/:bottle", sway).unwrap();
//! site.serve().unwrap();
//! ```
//!
//! Una vez que empieza a servir, la tabla de rutas queda en manos del
//! [`Server`] y ya no se puede modificar.

use crate::config::{Config, Limits};
use crate::error::Result;
use crate::http::Method;
use crate::router::{Handler, Route, Router};
use crate::server::{Server, Shutdown};

/// Host, puerto y tabla de rutas de una aplicación
#[derive(Debug, Clone)]
pub struct Site {
    host: String,
    port: u16,
    router: Router,
    limits: Limits,
}

impl Site {
    /// Crea un sitio sin rutas con los límites por defecto
    pub fn start(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            router: Router::new(),
            limits: Limits::default(),
        }
    }

    /// Crea un sitio con host, puerto y límites de la configuración
    pub fn from_config(config: &Config) -> Self {
        Self::start(&config.host, config.port).with_limits(config.limits())
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Registra una ruta
    ///
    /// El nombre efectivo lleva el prefijo del verbo, así que `"main"` puede
    /// registrarse una vez por verbo.
    pub fn route(&mut self, method: Method, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        self.router.register(method, name, path, handler)
    }

    pub fn get(&mut self, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        self.route(Method::GET, name, path, handler)
    }

    pub fn post(&mut self, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        self.route(Method::POST, name, path, handler)
    }

    pub fn put(&mut self, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        self.route(Method::PUT, name, path, handler)
    }

    pub fn delete(&mut self, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        self.route(Method::DELETE, name, path, handler)
    }

    pub fn options(&mut self, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        self.route(Method::OPTIONS, name, path, handler)
    }

    pub fn head(&mut self, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        self.route(Method::HEAD, name, path, handler)
    }

    pub fn trace(&mut self, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        self.route(Method::TRACE, name, path, handler)
    }

    pub fn connect(&mut self, name: &str, path: &str, handler: Handler) -> Result<&Route> {
        self.route(Method::CONNECT, name, path, handler)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Dirección para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Abre el listener sin empezar a aceptar
    pub fn bind(self) -> Result<Server> {
        Server::bind(self)
    }

    /// Bind + loop de conexiones; solo retorna si falla el bind
    pub fn serve(self) -> Result<()> {
        self.bind()?.run()
    }

    /// Igual que [`Site::serve`] pero se detiene cuando `shutdown` se activa
    pub fn serve_until(self, shutdown: Shutdown) -> Result<()> {
        self.bind()?.with_shutdown(shutdown).run()
    }
}
