use std::sync::Arc;

use log::{error, info};

use crate::almacenamiento::{cargar_aprobadas, guardar_aprobadas, Almacenamiento};
use crate::catalogo::Catalogo;
use crate::error::MallaError;
use crate::models::Aprobadas;
use crate::progreso::{aplicar, Accion, Efecto};
use crate::requisitos::evaluador::{esta_desbloqueada, requisitos_pendientes, Pendiente};
use crate::vista::{construir_vista, ConfigVista, VistaMalla};

/// Dueño único del conjunto de aprobadas. Aplica las transiciones y persiste
/// después de cada una que modifique el conjunto.
pub struct ControladorProgreso<S: Almacenamiento> {
    catalogo: Arc<Catalogo>,
    aprobadas: Aprobadas,
    storage: S,
}

impl<S: Almacenamiento> ControladorProgreso<S> {
    /// Restaura el progreso guardado (vacío si no hay o está corrupto).
    pub fn nuevo(catalogo: Arc<Catalogo>, storage: S) -> Self {
        let aprobadas = cargar_aprobadas(&storage);
        info!("progreso restaurado: {} materias aprobadas", aprobadas.len());
        ControladorProgreso { catalogo, aprobadas, storage }
    }

    pub fn alternar(&mut self, nombre: &str) -> Efecto {
        self.ejecutar(Accion::Alternar(nombre.to_string()))
    }

    pub fn reiniciar(&mut self) -> Efecto {
        self.ejecutar(Accion::Reiniciar)
    }

    /// Aplica la acción; si el conjunto cambia se guarda. Un fallo al guardar
    /// se registra y el estado en memoria se conserva.
    pub fn ejecutar(&mut self, accion: Accion) -> Efecto {
        let (nuevas, efecto) = aplicar(&self.aprobadas, &accion, &self.catalogo);
        info!("{:?} -> {:?}", accion, efecto);

        if efecto.modifica() {
            self.aprobadas = nuevas;
            if let Err(e) = guardar_aprobadas(&mut self.storage, &self.aprobadas) {
                error!("no se pudo guardar el progreso: {}", e);
            }
        }
        efecto
    }

    pub fn aprobadas(&self) -> &Aprobadas {
        &self.aprobadas
    }

    pub fn catalogo(&self) -> &Catalogo {
        &self.catalogo
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn esta_aprobada(&self, nombre: &str) -> bool {
        self.aprobadas.contains(nombre)
    }

    pub fn esta_desbloqueada(&self, nombre: &str) -> Result<bool, MallaError> {
        let materia = self.catalogo.materia_por_nombre(nombre)?;
        Ok(esta_desbloqueada(materia, &self.aprobadas, &self.catalogo))
    }

    pub fn pendientes(&self, nombre: &str) -> Result<Vec<Pendiente>, MallaError> {
        let materia = self.catalogo.materia_por_nombre(nombre)?;
        Ok(requisitos_pendientes(materia, &self.aprobadas, &self.catalogo))
    }

    pub fn vista(&self, config: &ConfigVista) -> VistaMalla {
        construir_vista(&self.catalogo, &self.aprobadas, config)
    }
}
