use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Conjunto de nombres de materias aprobadas por el estudiante.
///
/// Se usa un `BTreeSet` para que la serialización salga siempre ordenada.
pub type Aprobadas = BTreeSet<String>;

/// Una materia (ramo) de la malla curricular.
///
/// Los nombres de campo siguen el archivo de datos original; se aceptan también
/// los nombres en inglés al deserializar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Materia {
    #[serde(alias = "name")]
    pub nombre: String,
    #[serde(alias = "semester")]
    pub semestre: i32,
    /// Área temática en texto libre. `None` se evalúa como cadena vacía.
    #[serde(default)]
    pub area: Option<String>,
    /// Créditos de la materia; admite fracciones (2.5). `null` o ausente = 0.
    #[serde(default, alias = "credits", deserialize_with = "deserializar_creditos")]
    pub creditos: f64,
    /// Requisitos en texto libre; se interpretan al evaluar, no al cargar.
    #[serde(default, alias = "requirements")]
    pub requisitos: Vec<String>,
    /// Sólo afecta la presentación.
    #[serde(default, alias = "optional")]
    pub opcional: bool,
}

impl Materia {
    pub fn new(nombre: &str, semestre: i32, area: &str, creditos: impl Into<f64>) -> Self {
        Materia {
            nombre: nombre.to_string(),
            semestre,
            area: if area.is_empty() { None } else { Some(area.to_string()) },
            creditos: creditos.into(),
            requisitos: Vec::new(),
            opcional: false,
        }
    }

    pub fn con_requisitos<I, S>(mut self, requisitos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requisitos = requisitos.into_iter().map(Into::into).collect();
        self
    }

    pub fn opcional(mut self) -> Self {
        self.opcional = true;
        self
    }

    /// Área o cadena vacía si la materia no la define.
    pub fn area_o_vacia(&self) -> &str {
        self.area.as_deref().unwrap_or("")
    }
}

fn deserializar_creditos<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let creditos = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if !creditos.is_finite() || creditos < 0.0 {
        return Err(serde::de::Error::custom(format!("créditos inválidos: {}", creditos)));
    }
    Ok(creditos)
}
