//! # Comandos de Ejemplo
//! src/commands/mod.rs
//!
//! Aplicación de muestra que arranca el binario. Sirve como referencia de
//! cómo se escriben handlers y como blanco de los tests de integración.
//!
//! | Verbo                                  | Path             | Handler       |
//! |----------------------------------------|------------------|---------------|
//! | GET                                    | `/`              | `amor`        |
//! | GET                                    | `/params.json`   | `params_json` |
//! | GET                                    | `/:wine/:bottle` | `sway`        |
//! | POST, DELETE, PUT, OPTIONS, HEAD, TRACE| `/`              | `main`        |
//! | CONNECT                                | `/`              | `volare`      |

pub mod samples;

pub use samples::*;

use crate::error::Result;
use crate::Site;

/// Registra todas las rutas de muestra en `site`
pub fn register_samples(site: &mut Site) -> Result<()> {
    site.get("amor", "/", amor_handler)?;
    site.get("params_json", "/params.json", params_json_handler)?;
    site.get("sway", "/:wine/:bottle", sway_handler)?;
    site.post("main", "/", main_handler)?;
    site.delete("main", "/", main_handler)?;
    site.put("main", "/", main_handler)?;
    site.options("main", "/", main_handler)?;
    site.head("main", "/", main_handler)?;
    site.trace("main", "/", main_handler)?;
    site.connect("volare", "/", volare_handler)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_samples() {
        let mut site = Site::start("localhost", 0);
        register_samples(&mut site).unwrap();
        assert_eq!(site.router().len(), 10);
    }

    #[test]
    fn test_register_samples_twice_fails() {
        let mut site = Site::start("localhost", 0);
        register_samples(&mut site).unwrap();
        assert!(register_samples(&mut site).is_err());
        assert_eq!(site.router().len(), 10);
    }
}
