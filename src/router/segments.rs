//! # Segmentos de Path
//! src/router/segments.rs
//!
//! Separa un path en segmentos por un delimitador. Delimitadores repetidos
//! o al inicio/final no producen segmentos vacíos, así que:
//!
//! ```text
//! "/a/:b/*"  → ["a", ":b", "*"]
//! "//a//b/"  → ["a", "b"]
//! "/"        → []
//! ```
//!
//! Se usa igual para las plantillas de ruta y para los URLs entrantes, de
//! modo que la cantidad de segmentos y sus índices coinciden.

/// Secuencia ordenada de segmentos
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSegments {
    segments: Vec<String>,
}

impl PathSegments {
    /// Iterador sobre los segmentos no vacíos de `raw`
    pub fn split(raw: &str, delimiter: char) -> impl Iterator<Item = &str> {
        raw.split(delimiter).filter(|segment| !segment.is_empty())
    }

    /// Versión con dueño, para guardar junto a una ruta
    ///
    /// # Ejemplo
    /// ```
    /// use http_site::router::PathSegments;
    ///
    /// let segments = PathSegments::parse("/a/:b/*", '/');
    /// assert_eq!(segments.len(), 3);
    /// assert_eq!(segments.get(1), Some(":b"));
    /// assert!(PathSegments::parse("/", '/').is_empty());
    /// ```
    pub fn parse(raw: &str, delimiter: char) -> Self {
        Self {
            segments: Self::split(raw, delimiter).map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_segments() {
        let segments = PathSegments::parse("/a/:b/*", '/');
        let collected: Vec<_> = segments.iter().collect();
        assert_eq!(collected, vec!["a", ":b", "*"]);
    }

    #[test]
    fn test_root_has_no_segments() {
        assert_eq!(PathSegments::parse("/", '/').len(), 0);
        assert_eq!(PathSegments::parse("", '/').len(), 0);
        assert_eq!(PathSegments::parse("///", '/').len(), 0);
    }

    #[test]
    fn test_repeated_delimiters_collapse() {
        let segments = PathSegments::parse("//merlot///2019/", '/');
        assert_eq!(segments.len(), 2);
        assert_eq!(segments.get(0), Some("merlot"));
        assert_eq!(segments.get(1), Some("2019"));
        assert_eq!(segments.get(2), None);
    }

    #[test]
    fn test_no_leading_delimiter() {
        let segments = PathSegments::parse("wine/red", '/');
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_other_delimiter() {
        let pieces: Vec<_> = PathSegments::split("a&&b&c", '&').collect();
        assert_eq!(pieces, vec!["a", "b", "c"]);
    }
}
