//! # Dispatcher
//! src/server/dispatch.rs
//!
//! Request parseado ──▶ ruta ──▶ handler ──▶ Response.
//!
//! 1. Separa el URL en segmentos (dentro de la arena del request)
//! 2. Busca la primera ruta que coincide
//! 3. Copia los `:params` del path al mapa del request
//! 4. Ejecuta el handler; su retorno es el status de la response
//!
//! Escribir al socket queda a cargo del llamador.

use super::{Context, RequestArena};
use crate::error::{Error, Result};
use crate::http::{Request, Response};
use crate::router::Router;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

pub struct Dispatcher<'a> {
    router: &'a Router,
}

impl<'a> Dispatcher<'a> {
    pub fn new(router: &'a Router) -> Self {
        Self { router }
    }

    /// Despacha un request y retorna la response lista para escribir
    ///
    /// Los params del path se agregan al mapa del request, pisando cualquier
    /// query param o header con la misma clave. Un panic en el handler se
    /// convierte en `HandlerPanicked` y no tumba el servidor.
    pub fn dispatch(&self, request: &mut Request, arena: &RequestArena) -> Result<Response> {
        let segments = arena.split_path(request.url());

        let route = self
            .router
            .find(request.method(), segments.as_slice())
            .ok_or_else(|| Error::RouteNotFound {
                method: request.method(),
                url: request.url().to_string(),
            })?;

        if !route.bind_params(segments.as_slice(), request.params_mut()) {
            return Err(Error::AllocationFailure(format!("params for {}", route.name())));
        }

        let mut response = Response::default();
        let handler = route.handler();
        let outcome = {
            let mut ctx = Context::new(request, &mut response);
            panic::catch_unwind(AssertUnwindSafe(|| handler(&mut ctx)))
        };

        let status = match outcome {
            Ok(status) => status,
            Err(_) => {
                error!(route = route.name(), "handler panicked");
                return Err(Error::HandlerPanicked {
                    route: route.name().to_string(),
                });
            }
        };

        if response.overflowed() {
            return Err(Error::AllocationFailure(format!("response of {}", route.name())));
        }

        response.set_status(status);
        debug!(route = route.name(), status, bytes = response.body().len(), "handler finished");
        Ok(response)
    }
}
