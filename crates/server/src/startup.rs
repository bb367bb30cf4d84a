use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use common::logging::init_logging_default;
use service::directory::HttpDepartmentDirectory;

use crate::routes::{self, DepartmentState, EmployeeState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
fn load_bind_addr(default_port: u16) -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(default_port);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

async fn connect_db() -> anyhow::Result<DatabaseConnection> {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.database.normalize_from_env();
            cfg.database.validate()?;
            models::db::connect_with(&cfg.database).await
        }
        Err(_) => models::db::connect().await,
    }
}

fn load_directory_config() -> configs::DepartmentClientConfig {
    let mut cfg = configs::load_default()
        .map(|c| c.department)
        .unwrap_or_default();
    cfg.normalize_from_env();
    cfg
}

async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Public entry: run the department service.
pub async fn run_department() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let db = connect_db().await?;
    migration::DepartmentMigrator::up(&db, None).await?;

    let app = routes::department_router(DepartmentState { db }, build_cors());
    let addr = load_bind_addr(8080)?;
    info!(%addr, "starting department service");
    serve(app, addr).await
}

/// Public entry: run the employee service.
pub async fn run_employee() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let db = connect_db().await?;
    migration::EmployeeMigrator::up(&db, None).await?;

    let directory_cfg = load_directory_config();
    directory_cfg.validate()?;
    let directory = HttpDepartmentDirectory::new(
        &directory_cfg.base_url,
        Duration::from_millis(directory_cfg.timeout_ms),
    )?;

    let state = EmployeeState {
        db,
        directory: Arc::new(directory),
    };
    let app = routes::employee_router(state, build_cors());
    let addr = load_bind_addr(8081)?;
    info!(%addr, department_service = %directory_cfg.base_url, "starting employee service");
    serve(app, addr).await
}
