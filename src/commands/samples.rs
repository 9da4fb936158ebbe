//! # Handlers de Muestra
//! src/commands/samples.rs
//!
//! Todos vuelcan los parámetros recibidos (query, headers y path) como
//! líneas `clave:valor`, escriben un saludo y marcan la respuesta con
//! `Dino-Type: Wine`.

use crate::http::StatusCode;
use crate::server::Context;
use tracing::error;

/// Escribe `clave:valor` y, si hay, una nota después de cada par
fn dump_params(ctx: &mut Context<'_>, note: Option<&str>) {
    ctx.enumerate_params(|response, key, value| {
        response.send_formatted(format_args!("{}:{}\n\r", key, value));
        if let Some(note) = note {
            response.send(note.as_bytes());
        }
        true
    });
}

/// `Content-Type` se pisa a propósito: la respuesta debe salir con un solo
/// header `text/html`
fn tag_response(ctx: &mut Context<'_>) {
    ctx.set_header("Content-Type", "music");
    ctx.set_header("Content-Type", "text/html");
    ctx.set_header("Dino-Type", "Wine");
}

/// GET /
pub fn amor_handler(ctx: &mut Context<'_>) -> u16 {
    dump_params(ctx, Some("Check Pass"));
    ctx.send_formatted(format_args!(
        "When the moon hits you eye like a big {} {} pizza pie\n That's amore!\n\r",
        "pineapple pepperoni", "anchovies"
    ));
    tag_response(ctx);
    StatusCode::Ok.into()
}

/// GET /:wine/:bottle
pub fn sway_handler(ctx: &mut Context<'_>) -> u16 {
    dump_params(ctx, None);
    ctx.send(b"Hello From GET sway_test!\n");
    tag_response(ctx);
    StatusCode::Ok.into()
}

/// POST, DELETE, PUT, OPTIONS, HEAD y TRACE sobre /
pub fn main_handler(ctx: &mut Context<'_>) -> u16 {
    dump_params(ctx, None);
    let greeting = format!("Hello From {}!\n", ctx.method());
    ctx.send(greeting.as_bytes());
    ctx.send(greeting.as_bytes());
    tag_response(ctx);
    StatusCode::Ok.into()
}

/// CONNECT /
pub fn volare_handler(ctx: &mut Context<'_>) -> u16 {
    dump_params(ctx, None);
    ctx.send(b"Hello From CONNECT!\n");
    ctx.send(b"Hello From CONNECT!\n");
    tag_response(ctx);
    StatusCode::Ok.into()
}

/// GET /params.json
///
/// Los mismos parámetros que ven los demás handlers, como objeto JSON.
///
/// # Ejemplo de response
/// ```json
/// {"glass":"1","Host":"localhost:3032"}
/// ```
pub fn params_json_handler(ctx: &mut Context<'_>) -> u16 {
    match serde_json::to_vec(ctx.params()) {
        Ok(json) => {
            ctx.set_header("Content-Type", "application/json");
            ctx.send(&json);
            StatusCode::Ok.into()
        }
        Err(e) => {
            error!(error = %e, "unable to serialize params");
            StatusCode::InternalServerError.into()
        }
    }
}
