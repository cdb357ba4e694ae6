use std::io::Write;

use malla_interactiva::catalogo::cargar_catalogo;
use malla_interactiva::catalogo::excel::leer_catalogo_excel;
use malla_interactiva::{Catalogo, MallaError, Materia};

fn catalogo_desordenado() -> Catalogo {
    Catalogo::new(vec![
        Materia::new("Auditoría", 5, "Contable", 6),
        Materia::new("Contabilidad I", 1, "Contable", 6),
        Materia::new("Derecho Civil", 2, "Jurídica", 4),
        Materia::new("Matemática I", 1, "Matemática", 5),
        Materia::new("Taller", 5, "", 0).opcional(),
    ])
    .unwrap()
}

#[test]
fn test_semestres_ordenados_y_sin_repetir() {
    let cat = catalogo_desordenado();
    assert_eq!(cat.semestres(), vec![1, 2, 5]);
}

#[test]
fn test_materias_por_semestre_en_orden_de_catalogo() {
    let cat = catalogo_desordenado();
    let nombres: Vec<&str> = cat.materias_por_semestre(1).iter().map(|m| m.nombre.as_str()).collect();
    assert_eq!(nombres, vec!["Contabilidad I", "Matemática I"]);
    let nombres: Vec<&str> = cat.materias_por_semestre(5).iter().map(|m| m.nombre.as_str()).collect();
    assert_eq!(nombres, vec!["Auditoría", "Taller"]);
    assert!(cat.materias_por_semestre(3).is_empty());
}

#[test]
fn test_materia_por_nombre() {
    let cat = catalogo_desordenado();
    assert_eq!(cat.materia_por_nombre("Derecho Civil").unwrap().creditos, 4.0);
    assert!(cat.materia_por_nombre("Taller").unwrap().opcional);
}

#[test]
fn test_materia_no_encontrada_con_sugerencia() {
    let cat = catalogo_desordenado();
    match cat.materia_por_nombre("Contabilidad 1") {
        Err(MallaError::MateriaNoEncontrada { nombre, sugerencia }) => {
            assert_eq!(nombre, "Contabilidad 1");
            assert_eq!(sugerencia.as_deref(), Some("Contabilidad I"));
        }
        other => panic!("se esperaba MateriaNoEncontrada, fue {:?}", other),
    }

    match cat.materia_por_nombre("xyz") {
        Err(MallaError::MateriaNoEncontrada { sugerencia, .. }) => assert_eq!(sugerencia, None),
        other => panic!("se esperaba MateriaNoEncontrada, fue {:?}", other),
    }
}

#[test]
fn test_nombre_duplicado_rechazado() {
    let res = Catalogo::new(vec![
        Materia::new("Contabilidad I", 1, "Contable", 6),
        Materia::new("Contabilidad I", 2, "Contable", 6),
    ]);
    assert!(matches!(res, Err(MallaError::NombreDuplicado(n)) if n == "Contabilidad I"));
}

#[test]
fn test_json_con_campos_opcionales_y_alias() {
    let json = r#"[
        {"nombre": "Contabilidad I", "semestre": 1, "area": "Contable", "creditos": 6, "requisitos": []},
        {"name": "Practice", "semester": 2, "credits": 3, "requirements": ["Contabilidad I"], "optional": true},
        {"nombre": "Taller", "semestre": 2}
    ]"#;
    let cat = Catalogo::desde_json_str(json).unwrap();
    assert_eq!(cat.len(), 3);

    let practice = cat.materia_por_nombre("Practice").unwrap();
    assert_eq!(practice.area, None);
    assert_eq!(practice.requisitos, vec!["Contabilidad I"]);
    assert!(practice.opcional);

    let taller = cat.materia_por_nombre("Taller").unwrap();
    assert_eq!(taller.creditos, 0.0);
    assert!(taller.requisitos.is_empty());
    assert!(!taller.opcional);
}

#[test]
fn test_json_creditos_nulos_y_fraccionarios() {
    let json = r#"[
        {"nombre": "Seminario", "semestre": 1, "creditos": null},
        {"nombre": "Laboratorio", "semestre": 1, "creditos": 2.5},
        {"name": "Workshop", "semester": 2, "credits": 4}
    ]"#;
    let cat = Catalogo::desde_json_str(json).unwrap();
    assert_eq!(cat.materia_por_nombre("Seminario").unwrap().creditos, 0.0);
    assert_eq!(cat.materia_por_nombre("Laboratorio").unwrap().creditos, 2.5);
    assert_eq!(cat.creditos_totales(), 6.5);
}

#[test]
fn test_json_creditos_negativos_rechazados() {
    let json = r#"[{"nombre": "Rara", "semestre": 1, "creditos": -3}]"#;
    assert!(matches!(Catalogo::desde_json_str(json), Err(MallaError::Json(_))));
}

#[test]
fn test_json_invalido() {
    assert!(matches!(Catalogo::desde_json_str("{no es json"), Err(MallaError::Json(_))));
}

#[test]
fn test_malla_por_defecto() {
    let cat = Catalogo::por_defecto().expect("la malla incluida debe ser válida");
    assert!(!cat.is_empty());
    assert_eq!(cat.semestres().first(), Some(&1));
    // todo requisito por nombre de la malla incluida apunta a una materia existente
    for m in cat.materias() {
        for r in &m.requisitos {
            if let malla_interactiva::Requisito::Materia { nombre } = malla_interactiva::Requisito::parse(r) {
                assert!(cat.contiene(&nombre), "'{}' requiere '{}' que no existe", m.nombre, nombre);
            }
        }
    }
}

#[test]
fn test_cargar_catalogo_por_extension() {
    let cat = cargar_catalogo(None, None).unwrap();
    assert_eq!(cat.len(), Catalogo::por_defecto().unwrap().len());

    let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(f, r#"[{{"nombre": "Única", "semestre": 3, "creditos": 2}}]"#).unwrap();
    let cat = cargar_catalogo(Some(f.path()), None).unwrap();
    assert_eq!(cat.semestres(), vec![3]);

    let res = cargar_catalogo(Some(std::path::Path::new("malla.csv")), None);
    assert!(matches!(res, Err(MallaError::FormatoNoSoportado(_))));
}

#[test]
fn test_creditos_totales() {
    assert_eq!(catalogo_desordenado().creditos_totales(), 21.0);
}

// ---------------------------------------------------------------------------
// Workbook de Excel (tests/datafiles/malla_contador.xlsx)
// Hojas: "Malla 2020" (4 materias, semestres 1-3) y "Electivos" (1 materia)
// ---------------------------------------------------------------------------

fn workbook() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/datafiles/malla_contador.xlsx")
}

#[test]
fn test_excel_primera_hoja_por_defecto() {
    let cat = leer_catalogo_excel(workbook(), None).unwrap();
    assert_eq!(cat.len(), 4);
    assert_eq!(cat.semestres(), vec![1, 2, 3]);

    let auditoria = cat.materia_por_nombre("Auditoría").unwrap();
    assert_eq!(auditoria.area.as_deref(), Some("Contable"));
    assert_eq!(auditoria.creditos, 4.5);
    assert_eq!(auditoria.requisitos, vec!["Contabilidad II", "12 créditos en el área contable"]);
    assert!(auditoria.opcional);
    assert!(!cat.materia_por_nombre("Contabilidad I").unwrap().opcional);
}

#[test]
fn test_excel_hoja_por_nombre() {
    let cat = leer_catalogo_excel(workbook(), Some("Electivos")).unwrap();
    assert_eq!(cat.len(), 1);
    let taller = cat.materia_por_nombre("Taller de Oratoria").unwrap();
    assert_eq!(taller.semestre, 4);
    assert_eq!(taller.creditos, 2.0);
    assert_eq!(taller.area, None);
}

#[test]
fn test_excel_hoja_inexistente() {
    let res = leer_catalogo_excel(workbook(), Some("Malla 2030"));
    assert!(matches!(res, Err(MallaError::HojaNoEncontrada(h)) if h == "Malla 2030"));
}

#[test]
fn test_cargar_catalogo_xlsx() {
    let path = workbook();
    let cat = cargar_catalogo(Some(path.as_path()), Some("Malla 2020")).unwrap();
    assert!(cat.contiene("Contabilidad II"));
    assert_eq!(cat.creditos_totales(), 21.5);

    let res = cargar_catalogo(Some(path.as_path()), Some("No existe"));
    assert!(matches!(res, Err(MallaError::HojaNoEncontrada(_))));
}
