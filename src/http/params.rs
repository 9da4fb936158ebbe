//! # Mapa de Parámetros
//! src/http/params.rs
//!
//! Mapa `String → String` con orden de inserción estable. Lo usan tanto el
//! request (query string + headers + parámetros de path, todos en el mismo
//! espacio de nombres) como la respuesta (headers).
//!
//! Agregar una clave existente sobrescribe el valor y conserva la posición
//! original, así que nunca hay claves duplicadas.

use indexmap::IndexMap;
use serde::Serialize;

/// Mapa ordenado de parámetros/headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParamMap {
    entries: IndexMap<String, String>,
}

impl ParamMap {
    /// Crea un mapa vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea un mapa con capacidad reservada
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserta o sobrescribe una entrada
    ///
    /// Retorna `false` solo si no se pudo reservar memoria para una clave nueva.
    ///
    /// # Ejemplo
    /// ```
    /// use http_site::http::ParamMap;
    ///
    /// let mut headers = ParamMap::new();
    /// headers.add("Content-Type", "music");
    /// headers.add("Content-Type", "text/html");
    ///
    /// assert_eq!(headers.count(), 1);
    /// assert_eq!(headers.get("Content-Type"), "text/html");
    /// ```
    pub fn add(&mut self, key: &str, value: &str) -> bool {
        if let Some(existing) = self.entries.get_mut(key) {
            existing.clear();
            existing.push_str(value);
            return true;
        }

        if self.entries.try_reserve(1).is_err() {
            return false;
        }
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    /// Obtiene el valor de una clave, o `""` si no existe
    ///
    /// Para distinguir "ausente" de "presente pero vacío" usar [`ParamMap::exists`].
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }

    /// Verifica si la clave está presente
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Número de entradas
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visita cada par en orden de inserción
    ///
    /// El visitor retorna `false` para cortar el recorrido. El resultado es
    /// `true` si se visitaron todas las entradas.
    pub fn enumerate<F>(&self, mut visitor: F) -> bool
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.entries.iter().all(|(key, value)| visitor(key.as_str(), value.as_str()))
    }

    /// Iterador sobre los pares en orden de inserción
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut map = ParamMap::new();
        assert!(map.add("wine", "merlot"));
        assert_eq!(map.get("wine"), "merlot");
        assert_eq!(map.count(), 1);
    }

    #[test]
    fn test_missing_key_is_empty_string() {
        let mut map = ParamMap::new();
        map.add("empty", "");

        assert_eq!(map.get("missing"), "");
        assert_eq!(map.get("empty"), "");
        assert!(!map.exists("missing"));
        assert!(map.exists("empty"));
    }

    #[test]
    fn test_overwrite_keeps_single_entry_and_position() {
        let mut map = ParamMap::new();
        map.add("Content-Type", "music");
        map.add("Dino-Type", "Wine");
        map.add("Content-Type", "text/html");

        assert_eq!(map.count(), 2);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![("Content-Type", "text/html"), ("Dino-Type", "Wine")]);
    }

    #[test]
    fn test_enumerate_in_insertion_order() {
        let mut map = ParamMap::new();
        map.add("c", "3");
        map.add("a", "1");
        map.add("b", "2");

        let mut seen = Vec::new();
        let completed = map.enumerate(|k, v| {
            seen.push(format!("{}={}", k, v));
            true
        });

        assert!(completed);
        assert_eq!(seen, vec!["c=3", "a=1", "b=2"]);
    }

    #[test]
    fn test_enumerate_early_stop() {
        let mut map = ParamMap::new();
        map.add("a", "1");
        map.add("b", "2");
        map.add("c", "3");

        let mut visited = 0;
        let completed = map.enumerate(|k, _| {
            visited += 1;
            k != "b"
        });

        assert!(!completed);
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_serialize_as_object() {
        let mut map = ParamMap::new();
        map.add("wine", "merlot");
        map.add("bottle", "2019");

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"wine":"merlot","bottle":"2019"}"#);
    }
}
