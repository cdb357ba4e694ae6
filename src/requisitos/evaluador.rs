//! Evaluador de requisitos: decide si una materia está desbloqueada dado el
//! conjunto de materias aprobadas.
//!
//! Todas las funciones son puras sobre (materia, aprobadas, catálogo). Los
//! nombres aprobados que no existen en el catálogo aportan 0 créditos y nunca
//! provocan error.

use log::debug;
use serde::Serialize;

use crate::catalogo::Catalogo;
use crate::models::{Aprobadas, Materia};
use crate::requisitos::Requisito;

/// Requisito no cumplido, con el avance actual cuando es de créditos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pendiente {
    pub texto: String,
    pub requisito: Requisito,
    /// Créditos acumulados para requisitos de créditos; `None` para nombres.
    pub creditos_actuales: Option<f64>,
}

/// Suma de créditos de todas las materias aprobadas presentes en el catálogo.
pub fn creditos_aprobados(aprobadas: &Aprobadas, catalogo: &Catalogo) -> f64 {
    aprobadas
        .iter()
        .filter_map(|n| catalogo.buscar(n))
        .map(|m| m.creditos)
        .sum()
}

/// Suma de créditos aprobados cuyo área contiene `area` como subcadena,
/// sin distinguir mayúsculas. Una materia sin área cuenta como área vacía.
pub fn creditos_en_area(aprobadas: &Aprobadas, catalogo: &Catalogo, area: &str) -> f64 {
    let buscada = area.to_lowercase();
    aprobadas
        .iter()
        .filter_map(|n| catalogo.buscar(n))
        .filter(|m| m.area_o_vacia().to_lowercase().contains(&buscada))
        .map(|m| m.creditos)
        .sum()
}

/// Evalúa un requisito ya interpretado.
pub fn cumple_requisito(requisito: &Requisito, aprobadas: &Aprobadas, catalogo: &Catalogo) -> bool {
    match requisito {
        Requisito::CreditosEnArea { cantidad, area } => {
            creditos_en_area(aprobadas, catalogo, area) >= *cantidad as f64
        }
        Requisito::CreditosTotales { cantidad } => creditos_aprobados(aprobadas, catalogo) >= *cantidad as f64,
        Requisito::Materia { nombre } => aprobadas.contains(nombre),
    }
}

/// Una materia está desbloqueada si cumple todos sus requisitos (lista vacía => sí).
pub fn esta_desbloqueada(materia: &Materia, aprobadas: &Aprobadas, catalogo: &Catalogo) -> bool {
    let ok = materia
        .requisitos
        .iter()
        .all(|r| cumple_requisito(&Requisito::parse(r), aprobadas, catalogo));
    debug!("'{}' desbloqueada={}", materia.nombre, ok);
    ok
}

/// Lista los requisitos que la materia aún no cumple, en el orden declarado.
pub fn requisitos_pendientes(materia: &Materia, aprobadas: &Aprobadas, catalogo: &Catalogo) -> Vec<Pendiente> {
    materia
        .requisitos
        .iter()
        .filter_map(|texto| {
            let requisito = Requisito::parse(texto);
            if cumple_requisito(&requisito, aprobadas, catalogo) {
                return None;
            }
            let creditos_actuales = match &requisito {
                Requisito::CreditosEnArea { area, .. } => Some(creditos_en_area(aprobadas, catalogo, area)),
                Requisito::CreditosTotales { .. } => Some(creditos_aprobados(aprobadas, catalogo)),
                Requisito::Materia { .. } => None,
            };
            Some(Pendiente {
                texto: texto.clone(),
                requisito,
                creditos_actuales,
            })
        })
        .collect()
}
