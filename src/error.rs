//! Errores de dominio de la malla.
//!
//! Los backends de almacenamiento devuelven `Box<dyn Error>`; todo lo que toca
//! el catálogo (carga, búsqueda por nombre) usa `MallaError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MallaError {
    /// La materia pedida no existe en el catálogo. `sugerencia` trae el nombre
    /// más parecido cuando hay uno razonablemente cercano.
    #[error("materia no encontrada: '{nombre}'{}", sugerencia_texto(.sugerencia))]
    MateriaNoEncontrada {
        nombre: String,
        sugerencia: Option<String>,
    },

    #[error("nombre de materia duplicado en el catálogo: '{0}'")]
    NombreDuplicado(String),

    #[error("formato de catálogo no soportado: '{0}' (usa .json, .xlsx, .xls u .ods)")]
    FormatoNoSoportado(String),

    #[error("falta la columna '{0}' en la hoja de la malla")]
    ColumnaFaltante(String),

    #[error("hoja '{0}' no encontrada en el archivo Excel")]
    HojaNoEncontrada(String),

    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error de lectura: {0}")]
    Io(#[from] std::io::Error),

    #[error("error leyendo Excel: {0}")]
    Excel(#[from] calamine::Error),
}

fn sugerencia_texto(sugerencia: &Option<String>) -> String {
    match sugerencia {
        Some(s) => format!(" (¿quisiste decir '{}'?)", s),
        None => String::new(),
    }
}
