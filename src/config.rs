//! Configuración del servicio leída desde variables de entorno (y `.env` si existe).

use std::env;
use std::path::PathBuf;

use crate::almacenamiento::{Almacenamiento, ArchivoStorage, MemoriaStorage, SqliteStorage, StorageResult};
use crate::vista::{ConfigVista, COLOR_POR_DEFECTO, TITULO_POR_DEFECTO};

pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";
const ARCHIVO_POR_DEFECTO: &str = "datos/progreso.json";
const SQLITE_POR_DEFECTO: &str = "datos/progreso.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipoStorage {
    Memoria,
    Archivo(PathBuf),
    Sqlite(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    /// Malla a cargar; `None` usa la malla incluida en el crate.
    pub catalogo: Option<PathBuf>,
    pub hoja: Option<String>,
    pub storage: TipoStorage,
    pub vista: ConfigVista,
}

impl Config {
    /// Lee la configuración del entorno:
    ///
    /// - `MALLA_BIND` (por defecto `127.0.0.1:8080`)
    /// - `MALLA_CATALOGO`: ruta a un .json / .xlsx con la malla
    /// - `MALLA_CATALOGO_HOJA`: hoja del workbook
    /// - `MALLA_STORAGE`: `memoria` | `archivo` | `sqlite` (por defecto `archivo`)
    /// - `MALLA_STORAGE_PATH`: ruta del archivo de progreso
    /// - `MALLA_TITULO`, `MALLA_COLOR`
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Igual que `from_env` pero con una función de búsqueda inyectable.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let no_vacio = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let storage_path = no_vacio("MALLA_STORAGE_PATH").map(PathBuf::from);
        let storage = match no_vacio("MALLA_STORAGE").map(|s| s.to_lowercase()).as_deref() {
            Some("memoria") | Some("memory") => TipoStorage::Memoria,
            Some("sqlite") => TipoStorage::Sqlite(storage_path.unwrap_or_else(|| PathBuf::from(SQLITE_POR_DEFECTO))),
            Some("archivo") | Some("file") | None => {
                TipoStorage::Archivo(storage_path.unwrap_or_else(|| PathBuf::from(ARCHIVO_POR_DEFECTO)))
            }
            Some(otro) => {
                log::warn!("MALLA_STORAGE='{}' desconocido, se usa archivo", otro);
                TipoStorage::Archivo(storage_path.unwrap_or_else(|| PathBuf::from(ARCHIVO_POR_DEFECTO)))
            }
        };

        Config {
            bind: no_vacio("MALLA_BIND").unwrap_or_else(|| BIND_POR_DEFECTO.to_string()),
            catalogo: no_vacio("MALLA_CATALOGO").map(PathBuf::from),
            hoja: no_vacio("MALLA_CATALOGO_HOJA"),
            storage,
            vista: ConfigVista {
                titulo: no_vacio("MALLA_TITULO").unwrap_or_else(|| TITULO_POR_DEFECTO.to_string()),
                color: no_vacio("MALLA_COLOR").unwrap_or_else(|| COLOR_POR_DEFECTO.to_string()),
            },
        }
    }

    /// Abre el backend de almacenamiento configurado.
    pub fn abrir_storage(&self) -> StorageResult<Box<dyn Almacenamiento + Send>> {
        let storage: Box<dyn Almacenamiento + Send> = match &self.storage {
            TipoStorage::Memoria => Box::new(MemoriaStorage::new()),
            TipoStorage::Archivo(p) => Box::new(ArchivoStorage::new(p)),
            TipoStorage::Sqlite(p) => {
                let path = p.to_str().ok_or("ruta de sqlite no es UTF-8 válido")?;
                Box::new(SqliteStorage::open(Some(path))?)
            }
        };
        Ok(storage)
    }
}
