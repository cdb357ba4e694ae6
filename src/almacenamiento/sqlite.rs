use rusqlite::{params, Connection, OptionalExtension};

use super::{Almacenamiento, StorageResult};

/// Backend SQLite: una tabla `kv` con clave primaria de texto.
pub struct SqliteStorage {
    conn: Connection,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteStorage(..)")
    }
}

impl SqliteStorage {
    /// Abre una base en archivo, o en memoria con `None`.
    pub fn open(path: Option<&str>) -> StorageResult<Self> {
        let conn = match path {
            Some(p) => {
                if let Some(dir) = std::path::Path::new(p).parent() {
                    if !dir.as_os_str().is_empty() && !dir.exists() {
                        std::fs::create_dir_all(dir)?;
                    }
                }
                Connection::open(p)?
            }
            None => Connection::open_in_memory()?,
        };
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (clave TEXT PRIMARY KEY, valor TEXT NOT NULL)",
            [],
        )?;
        Ok(SqliteStorage { conn })
    }
}

impl Almacenamiento for SqliteStorage {
    fn leer(&self, clave: &str) -> StorageResult<Option<String>> {
        let valor = self
            .conn
            .query_row("SELECT valor FROM kv WHERE clave = ?1", params![clave], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(valor)
    }

    fn escribir(&mut self, clave: &str, valor: &str) -> StorageResult<()> {
        self.conn
            .execute("REPLACE INTO kv (clave, valor) VALUES (?1, ?2)", params![clave, valor])?;
        Ok(())
    }

    fn borrar(&mut self, clave: &str) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv WHERE clave = ?1", params![clave])?;
        Ok(())
    }
}
