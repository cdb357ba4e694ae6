//! Catálogo inmutable de materias de la malla.
//!
//! El índice nombre -> posición se construye una sola vez al crear el catálogo
//! y nunca se modifica; el evaluador de requisitos lo recibe por referencia.
//!
//! Submódulos:
//! - `excel`: lectura de la malla desde un workbook (calamine)

pub mod excel;

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use log::{debug, info};

use crate::error::MallaError;
use crate::models::Materia;

/// Malla por defecto, compilada en el binario.
const MALLA_POR_DEFECTO: &str = include_str!("../datafiles/contador_publico.json");

/// Similitud mínima (Jaro-Winkler) para sugerir un nombre parecido.
const UMBRAL_SUGERENCIA: f64 = 0.85;

#[derive(Debug, Clone)]
pub struct Catalogo {
    materias: Vec<Materia>,
    indice: HashMap<String, usize>,
}

impl Catalogo {
    /// Construye el catálogo validando que los nombres sean únicos.
    pub fn new(materias: Vec<Materia>) -> Result<Self, MallaError> {
        let mut indice = HashMap::with_capacity(materias.len());
        for (i, m) in materias.iter().enumerate() {
            if indice.insert(m.nombre.clone(), i).is_some() {
                return Err(MallaError::NombreDuplicado(m.nombre.clone()));
            }
        }
        debug!("catálogo construido con {} materias", materias.len());
        Ok(Catalogo { materias, indice })
    }

    /// Malla "Contador Público" incluida en el crate.
    pub fn por_defecto() -> Result<Self, MallaError> {
        Self::desde_json_str(MALLA_POR_DEFECTO)
    }

    pub fn desde_json_str(json: &str) -> Result<Self, MallaError> {
        let materias: Vec<Materia> = serde_json::from_str(json)?;
        Self::new(materias)
    }

    pub fn desde_archivo_json<P: AsRef<Path>>(path: P) -> Result<Self, MallaError> {
        let contenido = std::fs::read_to_string(path.as_ref())?;
        let catalogo = Self::desde_json_str(&contenido)?;
        info!("malla cargada desde {:?} ({} materias)", path.as_ref(), catalogo.len());
        Ok(catalogo)
    }

    /// Semestres distintos presentes, en orden ascendente.
    pub fn semestres(&self) -> Vec<i32> {
        self.materias
            .iter()
            .map(|m| m.semestre)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Materias del semestre indicado, en el orden del catálogo.
    pub fn materias_por_semestre(&self, semestre: i32) -> Vec<&Materia> {
        self.materias.iter().filter(|m| m.semestre == semestre).collect()
    }

    /// Búsqueda por nombre exacto; falla con sugerencia si no existe.
    pub fn materia_por_nombre(&self, nombre: &str) -> Result<&Materia, MallaError> {
        self.buscar(nombre).ok_or_else(|| MallaError::MateriaNoEncontrada {
            nombre: nombre.to_string(),
            sugerencia: self.nombre_mas_parecido(nombre),
        })
    }

    /// Búsqueda que no falla: `None` si el nombre no está en la malla.
    pub fn buscar(&self, nombre: &str) -> Option<&Materia> {
        self.indice.get(nombre).map(|&i| &self.materias[i])
    }

    pub fn contiene(&self, nombre: &str) -> bool {
        self.indice.contains_key(nombre)
    }

    pub fn materias(&self) -> &[Materia] {
        &self.materias
    }

    pub fn len(&self) -> usize {
        self.materias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materias.is_empty()
    }

    pub fn creditos_totales(&self) -> f64 {
        self.materias.iter().map(|m| m.creditos).sum()
    }

    fn nombre_mas_parecido(&self, nombre: &str) -> Option<String> {
        let buscado = nombre.to_lowercase();
        self.materias
            .iter()
            .map(|m| (strsim::jaro_winkler(&buscado, &m.nombre.to_lowercase()), &m.nombre))
            .filter(|(score, _)| *score >= UMBRAL_SUGERENCIA)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, n)| n.clone())
    }
}

/// Carga la malla según la extensión del archivo; sin ruta usa la malla por defecto.
pub fn cargar_catalogo(path: Option<&Path>, hoja: Option<&str>) -> Result<Catalogo, MallaError> {
    let Some(path) = path else {
        info!("usando malla por defecto (Contador Público)");
        return Catalogo::por_defecto();
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => Catalogo::desde_archivo_json(path),
        "xlsx" | "xls" | "xlsm" | "ods" => excel::leer_catalogo_excel(path, hoja),
        _ => Err(MallaError::FormatoNoSoportado(path.display().to_string())),
    }
}
