use std::net::SocketAddr;

use roster_server::config::{establish_connection, AppConfig};
use roster_server::domain::health::init_start_time;
use roster_server::shutdown::shutdown_signal;
use roster_server::utils::logging::init_logging;
use roster_server::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 설정 및 로깅 초기화
    let config = AppConfig::from_env()?;
    let _log_guard = init_logging(&config.log_dir);
    init_start_time();

    // 3. DB 연결
    let db = establish_connection(&config.database_url, config.db_schema_update).await?;

    // 4. 서버 실행
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = app(AppState { db, config });

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
