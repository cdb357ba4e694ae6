use malla_interactiva::almacenamiento::{
    cargar_aprobadas, guardar_aprobadas, Almacenamiento, ArchivoStorage, MemoriaStorage, SqliteStorage,
    CLAVE_APROBADAS,
};
use malla_interactiva::Aprobadas;

fn aprobadas(nombres: &[&str]) -> Aprobadas {
    nombres.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_ida_y_vuelta_en_memoria() {
    let mut s = MemoriaStorage::new();
    guardar_aprobadas(&mut s, &aprobadas(&["B", "A"])).unwrap();
    assert_eq!(cargar_aprobadas(&s), aprobadas(&["A", "B"]));
    // se guarda como arreglo JSON ordenado
    assert_eq!(s.leer(CLAVE_APROBADAS).unwrap().as_deref(), Some(r#"["A","B"]"#));
}

#[test]
fn test_orden_guardado_no_importa() {
    let mut s = MemoriaStorage::new();
    s.escribir(CLAVE_APROBADAS, r#"["B","A","B"]"#).unwrap();
    assert_eq!(cargar_aprobadas(&s), aprobadas(&["A", "B"]));
}

#[test]
fn test_datos_invalidos_son_conjunto_vacio() {
    for malo in ["", "null", "{\"a\": 1}", "[1, 2]", "[\"A\""] {
        let mut s = MemoriaStorage::new();
        s.escribir(CLAVE_APROBADAS, malo).unwrap();
        assert!(cargar_aprobadas(&s).is_empty(), "'{}' debería ignorarse", malo);
    }
    assert!(cargar_aprobadas(&MemoriaStorage::new()).is_empty());
}

#[test]
fn test_archivo_ida_y_vuelta() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub").join("progreso.json");

    let mut s = ArchivoStorage::new(&path);
    assert_eq!(s.leer(CLAVE_APROBADAS).unwrap(), None);
    guardar_aprobadas(&mut s, &aprobadas(&["Contabilidad I", "Matemática I"])).unwrap();
    s.escribir("otra", "x").unwrap();

    let otra_instancia = ArchivoStorage::new(&path);
    assert_eq!(cargar_aprobadas(&otra_instancia), aprobadas(&["Matemática I", "Contabilidad I"]));
    assert_eq!(otra_instancia.leer("otra").unwrap().as_deref(), Some("x"));

    s.borrar("otra").unwrap();
    assert_eq!(s.leer("otra").unwrap(), None);
}

#[test]
fn test_archivo_corrupto_se_sobrescribe() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progreso.json");
    std::fs::write(&path, "{{{ basura").unwrap();

    let mut s = ArchivoStorage::new(&path);
    assert!(s.leer(CLAVE_APROBADAS).is_err());
    assert!(cargar_aprobadas(&s).is_empty());

    guardar_aprobadas(&mut s, &aprobadas(&["A"])).unwrap();
    assert_eq!(cargar_aprobadas(&s), aprobadas(&["A"]));
}

#[test]
fn test_sqlite_en_archivo() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progreso.db");
    let path = path.to_str().unwrap();

    {
        let mut s = SqliteStorage::open(Some(path)).unwrap();
        guardar_aprobadas(&mut s, &aprobadas(&["A", "B"])).unwrap();
        guardar_aprobadas(&mut s, &aprobadas(&["A", "B", "C"])).unwrap();
    }

    let s = SqliteStorage::open(Some(path)).unwrap();
    assert_eq!(cargar_aprobadas(&s), aprobadas(&["A", "B", "C"]));
}
