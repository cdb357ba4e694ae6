use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{Almacenamiento, StorageResult};

/// Backend respaldado por un archivo JSON con forma `{ "clave": "valor" }`.
///
/// Cada escritura reescribe el archivo completo en un temporal y luego lo
/// renombra, así un corte a mitad de escritura no deja el archivo truncado.
#[derive(Debug, Clone)]
pub struct ArchivoStorage {
    path: PathBuf,
}

impl ArchivoStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ArchivoStorage { path: path.as_ref().to_path_buf() }
    }

    fn leer_todo(&self) -> StorageResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contenido = fs::read_to_string(&self.path)?;
        if contenido.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contenido)?)
    }

    fn escribir_todo(&self, datos: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(datos)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("progreso escrito en {:?}", self.path);
        Ok(())
    }
}

impl Almacenamiento for ArchivoStorage {
    fn leer(&self, clave: &str) -> StorageResult<Option<String>> {
        Ok(self.leer_todo()?.get(clave).cloned())
    }

    fn escribir(&mut self, clave: &str, valor: &str) -> StorageResult<()> {
        // un archivo corrupto no debe impedir guardar: se parte de cero
        let mut datos = self.leer_todo().unwrap_or_default();
        datos.insert(clave.to_string(), valor.to_string());
        self.escribir_todo(&datos)
    }

    fn borrar(&mut self, clave: &str) -> StorageResult<()> {
        let mut datos = self.leer_todo().unwrap_or_default();
        if datos.remove(clave).is_some() {
            self.escribir_todo(&datos)?;
        }
        Ok(())
    }
}
