//! Capa de almacenamiento clave-valor para el progreso del estudiante.
//!
//! El trait `Almacenamiento` guarda blobs de texto por clave. Hay tres backends:
//! memoria (tests / sesiones efímeras), archivo JSON y SQLite. El conjunto de
//! materias aprobadas se guarda bajo una sola clave fija como arreglo JSON.

mod archivo;
mod sqlite;

pub use archivo::ArchivoStorage;
pub use sqlite::SqliteStorage;

use std::collections::HashMap;
use std::error::Error;

use log::{debug, warn};

use crate::models::Aprobadas;

/// Clave bajo la cual se persiste el conjunto de materias aprobadas.
pub const CLAVE_APROBADAS: &str = "materiasAprobadas";

pub type StorageResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

pub trait Almacenamiento {
    /// Lee el valor guardado en `clave`, `None` si no existe.
    fn leer(&self, clave: &str) -> StorageResult<Option<String>>;
    /// Guarda (o reemplaza) el valor de `clave`.
    fn escribir(&mut self, clave: &str, valor: &str) -> StorageResult<()>;
    fn borrar(&mut self, clave: &str) -> StorageResult<()>;
}

impl<S: Almacenamiento + ?Sized> Almacenamiento for Box<S> {
    fn leer(&self, clave: &str) -> StorageResult<Option<String>> {
        (**self).leer(clave)
    }

    fn escribir(&mut self, clave: &str, valor: &str) -> StorageResult<()> {
        (**self).escribir(clave, valor)
    }

    fn borrar(&mut self, clave: &str) -> StorageResult<()> {
        (**self).borrar(clave)
    }
}

/// Backend en memoria.
#[derive(Debug, Default, Clone)]
pub struct MemoriaStorage {
    datos: HashMap<String, String>,
}

impl MemoriaStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Almacenamiento for MemoriaStorage {
    fn leer(&self, clave: &str) -> StorageResult<Option<String>> {
        Ok(self.datos.get(clave).cloned())
    }

    fn escribir(&mut self, clave: &str, valor: &str) -> StorageResult<()> {
        self.datos.insert(clave.to_string(), valor.to_string());
        Ok(())
    }

    fn borrar(&mut self, clave: &str) -> StorageResult<()> {
        self.datos.remove(clave);
        Ok(())
    }
}

/// Restaura las materias aprobadas. Nunca falla: datos ausentes, ilegibles o
/// con formato inválido se tratan como conjunto vacío.
pub fn cargar_aprobadas<S: Almacenamiento + ?Sized>(storage: &S) -> Aprobadas {
    let valor = match storage.leer(CLAVE_APROBADAS) {
        Ok(Some(v)) => v,
        Ok(None) => {
            debug!("sin progreso guardado, se parte vacío");
            return Aprobadas::new();
        }
        Err(e) => {
            warn!("no se pudo leer el progreso guardado: {}", e);
            return Aprobadas::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&valor) {
        Ok(nombres) => nombres.into_iter().collect(),
        Err(e) => {
            warn!("progreso guardado con formato inválido ({}), se descarta", e);
            Aprobadas::new()
        }
    }
}

/// Persiste las materias aprobadas como arreglo JSON ordenado.
pub fn guardar_aprobadas<S: Almacenamiento + ?Sized>(storage: &mut S, aprobadas: &Aprobadas) -> StorageResult<()> {
    let json = serde_json::to_string(aprobadas)?;
    storage.escribir(CLAVE_APROBADAS, &json)
}
