// Biblioteca raíz del crate `malla_interactiva`.
// Modelo de la malla curricular, evaluador de requisitos, progreso del
// estudiante con persistencia y el servidor HTTP que lo expone.
pub mod almacenamiento;
pub mod catalogo;
pub mod config;
pub mod error;
pub mod models;
pub mod progreso;
pub mod requisitos;
pub mod server;
pub mod vista;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;

pub use catalogo::Catalogo;
pub use error::MallaError;
pub use models::{Aprobadas, Materia};
pub use progreso::{Accion, ControladorProgreso, Efecto};
pub use requisitos::evaluador::esta_desbloqueada;
pub use requisitos::Requisito;
