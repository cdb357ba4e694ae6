use std::sync::{Arc, Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde_json::json;

use crate::almacenamiento::{Almacenamiento, MemoriaStorage};
use crate::catalogo::{cargar_catalogo, Catalogo};
use crate::config::Config;
use crate::error::MallaError;
use crate::progreso::{Accion, ControladorProgreso};
use crate::requisitos::evaluador;
use crate::vista::ConfigVista;

pub type ControladorServicio = ControladorProgreso<Box<dyn Almacenamiento + Send>>;

/// Estado compartido entre workers. El controlador va tras un Mutex: cada
/// request aplica su transición y la persiste antes de soltar el lock.
pub struct EstadoApp {
    controlador: Mutex<ControladorServicio>,
    vista: ConfigVista,
}

impl EstadoApp {
    pub fn new(controlador: ControladorServicio, vista: ConfigVista) -> Self {
        EstadoApp { controlador: Mutex::new(controlador), vista }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ControladorServicio>, HttpResponse> {
        self.controlador.lock().map_err(|_| {
            error!("mutex del controlador envenenado");
            HttpResponse::InternalServerError().json(json!({"error": "estado interno no disponible"}))
        })
    }
}

/// GET /malla
async fn malla_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let ctrl = match estado.lock() {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(ctrl.vista(&estado.vista))
}

/// GET /materias/{nombre}
/// Devuelve la materia, si está aprobada/desbloqueada y los requisitos pendientes.
async fn materia_handler(estado: web::Data<EstadoApp>, nombre: web::Path<String>) -> impl Responder {
    let nombre = nombre.into_inner();
    let ctrl = match estado.lock() {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let materia = match ctrl.catalogo().materia_por_nombre(&nombre) {
        Ok(m) => m,
        Err(e) => return no_encontrada(e),
    };

    HttpResponse::Ok().json(json!({
        "materia": materia,
        "aprobada": ctrl.esta_aprobada(&nombre),
        "desbloqueada": evaluador::esta_desbloqueada(materia, ctrl.aprobadas(), ctrl.catalogo()),
        "pendientes": evaluador::requisitos_pendientes(materia, ctrl.aprobadas(), ctrl.catalogo()),
    }))
}

/// POST /materias/{nombre}/alternar
async fn alternar_handler(estado: web::Data<EstadoApp>, nombre: web::Path<String>) -> impl Responder {
    ejecutar(&estado, Accion::Alternar(nombre.into_inner()))
}

/// POST /reiniciar
async fn reiniciar_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    ejecutar(&estado, Accion::Reiniciar)
}

/// POST /acciones con body `{"accion": "alternar", "materia": "..."}` o `{"accion": "reiniciar"}`
async fn accion_handler(estado: web::Data<EstadoApp>, body: web::Json<Accion>) -> impl Responder {
    ejecutar(&estado, body.into_inner())
}

fn ejecutar(estado: &EstadoApp, accion: Accion) -> HttpResponse {
    let mut ctrl = match estado.lock() {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let efecto = ctrl.ejecutar(accion);
    HttpResponse::Ok().json(json!({
        "efecto": efecto,
        "vista": ctrl.vista(&estado.vista),
    }))
}

fn no_encontrada(e: MallaError) -> HttpResponse {
    match e {
        MallaError::MateriaNoEncontrada { ref nombre, ref sugerencia } => HttpResponse::NotFound().json(json!({
            "error": e.to_string(),
            "materia": nombre,
            "sugerencia": sugerencia,
        })),
        other => HttpResponse::InternalServerError().json(json!({"error": other.to_string()})),
    }
}

async fn help_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "description": "API de la malla interactiva: consulta el estado de cada materia y marca materias como aprobadas.",
        "endpoints": {
            "GET /malla": "vista completa agrupada por semestre",
            "GET /materias/{nombre}": "detalle de una materia y requisitos pendientes",
            "POST /materias/{nombre}/alternar": "aprueba (si está desbloqueada) o desaprueba una materia",
            "POST /reiniciar": "borra todo el progreso",
            "POST /acciones": "acción genérica en JSON",
        },
        "accion_example": {"accion": "alternar", "materia": "Contabilidad I"},
    }))
}

/// Registra las rutas; separado de `run_server` para poder probarlas.
pub fn configurar(cfg: &mut web::ServiceConfig) {
    cfg.route("/malla", web::get().to(malla_handler))
        .route("/materias/{nombre}", web::get().to(materia_handler))
        .route("/materias/{nombre}/alternar", web::post().to(alternar_handler))
        .route("/reiniciar", web::post().to(reiniciar_handler))
        .route("/acciones", web::post().to(accion_handler))
        .route("/help", web::get().to(help_handler));
}

/// Construye el estado a partir de la configuración: carga la malla y abre el
/// almacenamiento. Sólo falla si no se puede cargar la malla; un almacenamiento
/// que no abre se reemplaza por uno en memoria.
pub fn construir_estado(config: &Config) -> Result<EstadoApp, MallaError> {
    let catalogo: Catalogo = cargar_catalogo(config.catalogo.as_deref(), config.hoja.as_deref())?;
    info!("malla con {} materias en {} semestres", catalogo.len(), catalogo.semestres().len());
    let storage: Box<dyn Almacenamiento + Send> = match config.abrir_storage() {
        Ok(s) => s,
        Err(e) => {
            error!(
                "no se pudo abrir el almacenamiento {:?}: {}; el progreso no se guardará",
                config.storage, e
            );
            Box::new(MemoriaStorage::new())
        }
    };
    let controlador = ControladorProgreso::nuevo(Arc::new(catalogo), storage);
    Ok(EstadoApp::new(controlador, config.vista.clone()))
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let estado = construir_estado(&config).map_err(|e| {
        error!("no se pudo iniciar: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let estado = web::Data::new(estado);

    info!("Iniciando servidor en http://{}", config.bind);
    HttpServer::new(move || {
        App::new()
            .app_data(estado.clone())
            .wrap(Cors::permissive())
            .configure(configurar)
    })
    .bind(&config.bind)?
    .run()
    .await
}
