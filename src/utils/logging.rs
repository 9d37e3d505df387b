//! 로깅 초기화 모듈
//!
//! stdout과 일별 로그 파일에 JSON 형식으로 동시 출력합니다.

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG`가 없을 때 사용하는 필터
pub const DEFAULT_LOG_FILTER: &str = "info,roster_server=debug";

/// 로그 파일 이름 접두사 (`roster-server.log.YYYY-MM-DD`)
const LOG_FILE_PREFIX: &str = "roster-server.log";

/// 로깅 시스템을 초기화합니다.
///
/// 반환되는 `WorkerGuard`를 main에서 유지해야 종료 시 버퍼링된 로그가 파일에 기록됩니다.
/// 이미 전역 subscriber가 설정된 경우(테스트 등)에는 조용히 넘어갑니다.
pub fn init_logging(log_dir: &str) -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true);

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .with_ansi(false)
        .with_writer(file_writer);

    let result = tracing_subscriber::registry()
        .with(log_filter())
        .with(stdout_layer)
        .with(file_layer)
        .try_init();

    if let Err(err) = result {
        use std::error::Error;
        let already_set = err
            .source()
            .and_then(|s| s.downcast_ref::<tracing::dispatcher::SetGlobalDefaultError>())
            .is_some();
        if !already_set {
            eprintln!("Failed to initialize tracing: {}", err);
        }
    }

    guard
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_should_parse() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER);

        assert!(filter.is_ok());
    }

    #[test]
    fn init_logging_should_be_idempotent() {
        let dir = std::env::temp_dir().join("roster-server-logging-test");
        let dir = dir.to_string_lossy();

        let _first = init_logging(&dir);
        let _second = init_logging(&dir);
    }
}
