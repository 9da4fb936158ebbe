//! # Arena por Request
//! src/server/arena.rs
//!
//! Memoria de trabajo de un request: buffers de línea del parser y los
//! segmentos del URL. Todo se asigna con bump-pointer y se recupera de una
//! sola vez con [`RequestArena::reset`] al cerrar la conexión, pase lo que
//! pase con el handler. En estado estable el reset reutiliza el bloque
//! inicial y no hay malloc/free por request; si un request hizo crecer la
//! arena, el reset la devuelve a su tamaño inicial.
//!
//! Lo que sobrevive al request (el `Request` y la `Response` que ve el
//! handler) no vive aquí.

use crate::router::PathSegments;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

pub struct RequestArena {
    bump: Bump,
    capacity: usize,
    baseline: usize,
}

impl RequestArena {
    /// Crea una arena con un bloque inicial de `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        let bump = Bump::with_capacity(capacity);
        let baseline = bump.allocated_bytes();
        Self {
            bump,
            capacity,
            baseline,
        }
    }

    /// Buffer de bytes vacío para leer una línea del socket
    pub fn line_buffer(&self) -> BumpVec<'_, u8> {
        BumpVec::with_capacity_in(128, &self.bump)
    }

    /// Separa un URL en segmentos copiados dentro de la arena
    ///
    /// Los segmentos no toman prestado el URL original, así el dispatcher
    /// puede mutar el request mientras los usa.
    pub fn split_path(&self, url: &str) -> BumpVec<'_, &str> {
        let mut segments = BumpVec::new_in(&self.bump);
        for segment in PathSegments::split(url, '/') {
            segments.push(&*self.bump.alloc_str(segment));
        }
        segments
    }

    /// Capacidad total de los bloques que retiene la arena
    ///
    /// No es lo que está en uso: un reset no la baja salvo que la arena haya
    /// crecido por encima de su bloque inicial.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Recupera toda la memoria del request
    ///
    /// Si la arena creció, se reemplaza por una nueva del tamaño inicial.
    pub fn reset(&mut self) {
        if self.bump.allocated_bytes() > self.baseline {
            self.bump = Bump::with_capacity(self.capacity);
            self.baseline = self.bump.allocated_bytes();
        } else {
            self.bump.reset();
        }
    }
}

impl Default for RequestArena {
    fn default() -> Self {
        Self::with_capacity(crate::config::DEFAULT_ARENA_BYTES)
    }
}
