//! Progreso del estudiante: transiciones puras sobre el conjunto de aprobadas
//! y el controlador que las aplica y persiste.

mod controlador;

pub use controlador::ControladorProgreso;

use serde::{Deserialize, Serialize};

use crate::catalogo::Catalogo;
use crate::models::Aprobadas;
use crate::requisitos::evaluador::esta_desbloqueada;

/// Acción del usuario sobre la malla.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "accion", content = "materia", rename_all = "snake_case")]
pub enum Accion {
    /// Click sobre la tarjeta de una materia.
    Alternar(String),
    /// Botón "Reiniciar progreso".
    Reiniciar,
}

/// Resultado de aplicar una acción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Efecto {
    Aprobada,
    Desaprobada,
    /// La materia existe pero no cumple sus requisitos; nada cambia.
    Bloqueada,
    /// El nombre no está en la malla ni entre las aprobadas; nada cambia.
    NoEncontrada,
    Reiniciada,
}

impl Efecto {
    /// Indica si el conjunto de aprobadas cambió (o pudo cambiar) y debe persistirse.
    pub fn modifica(&self) -> bool {
        matches!(self, Efecto::Aprobada | Efecto::Desaprobada | Efecto::Reiniciada)
    }
}

/// Transición pura: no hace IO ni modifica la entrada.
///
/// Desaprobar está siempre permitido, aunque otras materias aprobadas dependan
/// de la que se quita.
pub fn aplicar(aprobadas: &Aprobadas, accion: &Accion, catalogo: &Catalogo) -> (Aprobadas, Efecto) {
    match accion {
        Accion::Reiniciar => (Aprobadas::new(), Efecto::Reiniciada),
        Accion::Alternar(nombre) => {
            if aprobadas.contains(nombre) {
                let mut nuevas = aprobadas.clone();
                nuevas.remove(nombre);
                return (nuevas, Efecto::Desaprobada);
            }

            match catalogo.buscar(nombre) {
                Some(materia) if esta_desbloqueada(materia, aprobadas, catalogo) => {
                    let mut nuevas = aprobadas.clone();
                    nuevas.insert(nombre.clone());
                    (nuevas, Efecto::Aprobada)
                }
                Some(_) => (aprobadas.clone(), Efecto::Bloqueada),
                None => (aprobadas.clone(), Efecto::NoEncontrada),
            }
        }
    }
}
