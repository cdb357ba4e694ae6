//! Requisitos de una materia.
//!
//! Cada requisito llega como texto libre y se clasifica en una de tres formas,
//! en este orden de precedencia:
//!
//! 1. `"<N> créditos en el área <AREA>"` / `"<N> credits in area <AREA>"`
//! 2. `"<N> créditos"` / `"<N> credits"` (cualquier área)
//! 3. cualquier otro texto: nombre exacto de otra materia
//!
//! La clasificación es insensible a mayúsculas y no exige que el número esté
//! al inicio ("Tener 30 créditos" es un requisito de créditos totales).

pub mod evaluador;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static RE_CREDITOS_EN_AREA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)(\d+)\s+(?:cr[ée]ditos?|credits?)\s+(?:in\s+(?:the\s+)?area|en\s+(?:el\s+)?[áa]rea)\s+(\S.*?)\s*$",
    )
    .expect("regex de créditos por área inválida")
});

static RE_CREDITOS_TOTALES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s+(?:cr[ée]ditos?|credits?)").expect("regex de créditos totales inválida")
});

/// Forma interpretada de un requisito.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum Requisito {
    /// Suma de créditos aprobados cuyo área contiene `area` (sin distinguir mayúsculas).
    CreditosEnArea { cantidad: u64, area: String },
    /// Suma de todos los créditos aprobados.
    CreditosTotales { cantidad: u64 },
    /// Otra materia que debe estar aprobada.
    Materia { nombre: String },
}

impl Requisito {
    /// Clasifica un requisito en texto libre. Nunca falla: lo que no calza con
    /// un patrón de créditos se toma como nombre de materia.
    pub fn parse(texto: &str) -> Requisito {
        if let Some(caps) = RE_CREDITOS_EN_AREA.captures(texto) {
            return Requisito::CreditosEnArea {
                cantidad: parse_cantidad(&caps[1]),
                area: caps[2].to_string(),
            };
        }

        if let Some(caps) = RE_CREDITOS_TOTALES.captures(texto) {
            return Requisito::CreditosTotales {
                cantidad: parse_cantidad(&caps[1]),
            };
        }

        Requisito::Materia { nombre: texto.to_string() }
    }
}

/// Un número que no cabe en `u64` queda saturado (requisito imposible de cumplir).
fn parse_cantidad(digitos: &str) -> u64 {
    digitos.parse::<u64>().unwrap_or(u64::MAX)
}

impl fmt::Display for Requisito {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requisito::CreditosEnArea { cantidad, area } => {
                write!(f, "{} créditos en el área {}", cantidad, area)
            }
            Requisito::CreditosTotales { cantidad } => write!(f, "{} créditos", cantidad),
            Requisito::Materia { nombre } => write!(f, "{}", nombre),
        }
    }
}
