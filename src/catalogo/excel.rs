use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use log::{info, warn};

use crate::catalogo::Catalogo;
use crate::error::MallaError;
use crate::models::Materia;

/// Convierte un `Data` de calamine a String.
fn data_to_string(d: &Data) -> String {
    match d {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "1".to_string() } else { "0".to_string() },
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Normaliza encabezados eliminando espacios, acentos comunes y pasando a minúsculas.
fn normalize_header(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

/// Separa la celda de requisitos: uno por línea o separados por ';'.
fn split_requisitos(celda: &str) -> Vec<String> {
    celda
        .split([';', '\n'])
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_opcional(v: &str) -> bool {
    let vlow = v.trim().to_lowercase();
    match vlow.as_str() {
        "true" | "si" | "sí" | "x" | "opcional" => true,
        _ => vlow.parse::<f64>().map(|f| f != 0.0).unwrap_or(false),
    }
}

/// Lee una malla desde Excel. La primera fila debe traer los encabezados
/// `nombre, semestre, area, creditos, requisitos, opcional` (en cualquier orden;
/// sólo `nombre` y `semestre` son obligatorios). Sin `hoja` se usa la primera.
pub fn leer_catalogo_excel<P: AsRef<Path>>(path: P, hoja: Option<&str>) -> Result<Catalogo, MallaError> {
    let mut workbook = open_workbook_auto(path.as_ref())?;

    let sheet_names = workbook.sheet_names().to_owned();
    let hoja_usada = match hoja {
        Some(h) => sheet_names
            .iter()
            .find(|s| s.as_str() == h)
            .cloned()
            .ok_or_else(|| MallaError::HojaNoEncontrada(h.to_string()))?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| MallaError::HojaNoEncontrada("<primera>".to_string()))?,
    };

    let range = workbook.worksheet_range(&hoja_usada)?;
    let filas: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(data_to_string).collect())
        .collect();

    let materias = materias_desde_filas(&filas)?;
    info!(
        "malla leída desde {:?} hoja '{}' ({} materias)",
        path.as_ref(),
        hoja_usada,
        materias.len()
    );
    Catalogo::new(materias)
}

/// Interpreta filas ya convertidas a texto (la primera es el encabezado).
pub(crate) fn materias_desde_filas(filas: &[Vec<String>]) -> Result<Vec<Materia>, MallaError> {
    let Some(encabezado) = filas.first() else {
        return Ok(Vec::new());
    };

    let columnas: HashMap<String, usize> = encabezado
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header(h), i))
        .collect();

    let col = |nombre: &str| columnas.get(nombre).copied();
    let col_nombre = col("nombre").ok_or_else(|| MallaError::ColumnaFaltante("nombre".into()))?;
    let col_semestre = col("semestre").ok_or_else(|| MallaError::ColumnaFaltante("semestre".into()))?;
    let col_area = col("area");
    let col_creditos = col("creditos");
    let col_requisitos = col("requisitos");
    let col_opcional = col("opcional");

    let celda = |fila: &Vec<String>, idx: Option<usize>| -> String {
        idx.and_then(|i| fila.get(i)).cloned().unwrap_or_default()
    };

    let mut materias = Vec::new();
    for (row_idx, fila) in filas.iter().enumerate().skip(1) {
        let nombre = celda(fila, Some(col_nombre));
        if nombre.is_empty() {
            continue;
        }

        let semestre = match celda(fila, Some(col_semestre)).parse::<i32>() {
            Ok(s) => s,
            Err(_) => {
                warn!("fila {}: semestre inválido para '{}', se omite", row_idx + 1, nombre);
                continue;
            }
        };

        let area = celda(fila, col_area);
        let creditos = celda(fila, col_creditos)
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite() && *c >= 0.0)
            .unwrap_or(0.0);

        materias.push(Materia {
            nombre,
            semestre,
            area: if area.is_empty() { None } else { Some(area) },
            creditos,
            requisitos: split_requisitos(&celda(fila, col_requisitos)),
            opcional: parse_opcional(&celda(fila, col_opcional)),
        });
    }

    Ok(materias)
}
