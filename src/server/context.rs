//! # Contexto del Handler
//! src/server/context.rs
//!
//! Lo único que ve un handler: el request (solo lectura) y la response que
//! está construyendo. Es un tipo distinto de [`crate::Site`], así que no hay
//! forma de confundir el handle del sitio con el de un request.

use crate::http::{Method, ParamMap, Request, Response};
use std::fmt;

pub struct Context<'a> {
    request: &'a Request,
    response: &'a mut Response,
}

impl<'a> Context<'a> {
    pub fn new(request: &'a Request, response: &'a mut Response) -> Self {
        Self { request, response }
    }

    pub fn method(&self) -> Method {
        self.request.method()
    }

    pub fn url(&self) -> &str {
        self.request.url()
    }

    pub fn body(&self) -> &[u8] {
        self.request.body()
    }

    /// Valor del parámetro (query, header o path), `""` si no existe
    pub fn param(&self, key: &str) -> &str {
        self.request.param(key)
    }

    pub fn param_exists(&self, key: &str) -> bool {
        self.request.params().exists(key)
    }

    pub fn param_count(&self) -> usize {
        self.request.params().count()
    }

    pub fn params(&self) -> &ParamMap {
        self.request.params()
    }

    /// Recorre los parámetros en orden de inserción
    ///
    /// El visitor recibe la response para poder escribir mientras itera y
    /// retorna `false` para cortar el recorrido. Retorna `false` si se cortó.
    ///
    /// ```
    /// use http_site::server::Context;
    ///
    /// fn dump(ctx: &mut Context<'_>) -> u16 {
    ///     ctx.enumerate_params(|response, key, value| {
    ///         response.send_formatted(format_args!("{}:{}\n", key, value));
    ///         true
    ///     });
    ///     200
    /// }
    /// ```
    pub fn enumerate_params<F>(&mut self, mut visitor: F) -> bool
    where
        F: FnMut(&mut Response, &str, &str) -> bool,
    {
        let response = &mut *self.response;
        self.request
            .params()
            .enumerate(|key, value| visitor(&mut *response, key, value))
    }

    /// Agrega bytes crudos al body
    pub fn send(&mut self, data: &[u8]) {
        self.response.send(data);
    }

    /// Agrega texto formateado al body
    pub fn send_formatted(&mut self, args: fmt::Arguments<'_>) {
        self.response.send_formatted(args);
    }

    /// Define un header de la response; repetir la clave la sobrescribe
    pub fn set_header(&mut self, key: &str, value: &str) {
        self.response.set_header(key, value);
    }

    pub fn response(&self) -> &Response {
        self.response
    }
}

impl fmt::Write for Context<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.response.send(s.as_bytes());
        Ok(())
    }
}
