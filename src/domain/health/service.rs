use std::fmt::Display;
use std::future::Future;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use sea_orm::DatabaseConnection;
use tracing::warn;

use super::dto::{DatabaseCheck, HealthReport};

static START_TIME: OnceLock<Instant> = OnceLock::new();

const DB_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// 서버 기동 시각 기록 (가동 시간 계산용)
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

fn uptime_secs() -> u64 {
    START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}

pub async fn check_health(db: &DatabaseConnection) -> HealthReport {
    let database = ping_within(DB_PING_TIMEOUT, db.ping()).await;

    HealthReport {
        status: database.state(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: uptime_secs(),
        database,
    }
}

/// `limit` 안에 ping이 끝나면 성공/실패를, 끝나지 않으면 시간 초과를 기록합니다.
async fn ping_within<F, E>(limit: Duration, ping: F) -> DatabaseCheck
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    let start = Instant::now();

    match tokio::time::timeout(limit, ping).await {
        Ok(Ok(())) => DatabaseCheck {
            reachable: true,
            latency_ms: start.elapsed().as_millis() as u64,
            error: None,
        },
        Ok(Err(e)) => {
            warn!(error = %e, "Database ping failed");
            DatabaseCheck {
                reachable: false,
                latency_ms: start.elapsed().as_millis() as u64,
                error: Some(e.to_string()),
            }
        }
        Err(_) => {
            warn!(limit_ms = limit.as_millis() as u64, "Database ping timed out");
            DatabaseCheck {
                reachable: false,
                latency_ms: limit.as_millis() as u64,
                error: Some(format!("ping timed out after {}ms", limit.as_millis())),
            }
        }
    }
}
