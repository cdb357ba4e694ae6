//! Modelo de vista de la malla: lo que un front-end necesita para dibujar la
//! grilla (columnas por semestre, estado de cada tarjeta, texto de ayuda) sin
//! volver a evaluar requisitos.

use serde::Serialize;

use crate::catalogo::Catalogo;
use crate::models::{Aprobadas, Materia};
use crate::requisitos::evaluador::{creditos_aprobados, esta_desbloqueada};

pub const TITULO_POR_DEFECTO: &str = "Malla Interactiva Contador Público";
pub const COLOR_POR_DEFECTO: &str = "#e91e63";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigVista {
    pub titulo: String,
    /// Color de los encabezados de semestre.
    pub color: String,
}

impl Default for ConfigVista {
    fn default() -> Self {
        ConfigVista {
            titulo: TITULO_POR_DEFECTO.to_string(),
            color: COLOR_POR_DEFECTO.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoMateria {
    Aprobada,
    Desbloqueada,
    Bloqueada,
}

#[derive(Debug, Clone, Serialize)]
pub struct VistaMateria {
    pub nombre: String,
    pub area: Option<String>,
    pub creditos: f64,
    pub requisitos: Vec<String>,
    pub opcional: bool,
    pub aprobada: bool,
    pub desbloqueada: bool,
    pub estado: EstadoMateria,
    pub clases: Vec<&'static str>,
    /// Texto de ayuda (tooltip) de la tarjeta.
    pub detalle: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VistaSemestre {
    pub semestre: i32,
    pub encabezado: String,
    pub materias: Vec<VistaMateria>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resumen {
    pub materias_aprobadas: usize,
    pub materias_totales: usize,
    pub creditos_aprobados: f64,
    pub creditos_totales: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VistaMalla {
    pub titulo: String,
    pub color: String,
    pub semestres: Vec<VistaSemestre>,
    pub resumen: Resumen,
}

pub fn construir_vista(catalogo: &Catalogo, aprobadas: &Aprobadas, config: &ConfigVista) -> VistaMalla {
    let semestres = catalogo
        .semestres()
        .into_iter()
        .map(|semestre| VistaSemestre {
            semestre,
            encabezado: format!("Semestre {}", semestre),
            materias: catalogo
                .materias_por_semestre(semestre)
                .into_iter()
                .map(|m| vista_materia(m, aprobadas, catalogo))
                .collect(),
        })
        .collect();

    // sólo cuentan las aprobadas que siguen existiendo en la malla
    let materias_aprobadas = aprobadas.iter().filter(|n| catalogo.contiene(n)).count();

    VistaMalla {
        titulo: config.titulo.clone(),
        color: config.color.clone(),
        semestres,
        resumen: Resumen {
            materias_aprobadas,
            materias_totales: catalogo.len(),
            creditos_aprobados: creditos_aprobados(aprobadas, catalogo),
            creditos_totales: catalogo.creditos_totales(),
        },
    }
}

fn vista_materia(materia: &Materia, aprobadas: &Aprobadas, catalogo: &Catalogo) -> VistaMateria {
    let aprobada = aprobadas.contains(&materia.nombre);
    let desbloqueada = esta_desbloqueada(materia, aprobadas, catalogo);

    let estado = if aprobada {
        EstadoMateria::Aprobada
    } else if desbloqueada {
        EstadoMateria::Desbloqueada
    } else {
        EstadoMateria::Bloqueada
    };

    let mut clases = vec!["materia-card"];
    if aprobada {
        clases.push("aprobada");
    }
    clases.push(if desbloqueada { "desbloqueada" } else { "bloqueada" });
    if materia.opcional {
        clases.push("opcional");
    }

    VistaMateria {
        nombre: materia.nombre.clone(),
        area: materia.area.clone(),
        creditos: materia.creditos,
        requisitos: materia.requisitos.clone(),
        opcional: materia.opcional,
        aprobada,
        desbloqueada,
        estado,
        clases,
        detalle: detalle(materia),
    }
}

fn detalle(materia: &Materia) -> String {
    let requisitos = if materia.requisitos.is_empty() {
        "Ninguno".to_string()
    } else {
        materia.requisitos.join(", ")
    };
    format!(
        "Área: {}\nCréditos: {}\nRequisitos: {}",
        materia.area_o_vacia(),
        materia.creditos,
        requisitos
    )
}
