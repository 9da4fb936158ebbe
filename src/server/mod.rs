//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Todo lo que pasa después de registrar las rutas:
//! 1. Escuchar en un puerto ([`Server`])
//! 2. Aceptar conexiones, una a la vez
//! 3. Parsear y despachar cada request ([`Dispatcher`]) usando memoria de
//!    una arena que se resetea entre conexiones ([`RequestArena`])
//! 4. Exponer al handler solo su request y su response ([`Context`])
//! 5. Detenerse cuando se activa el [`Shutdown`]

pub mod arena;
pub mod context;
pub mod dispatch;
pub mod shutdown;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use arena::RequestArena;
pub use context::Context;
pub use dispatch::Dispatcher;
pub use shutdown::Shutdown;
pub use tcp::Server;
