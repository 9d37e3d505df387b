use serde::Serialize;
use utoipa::ToSchema;

/// GET /health 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    pub database: DatabaseCheck,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// DB ping 결과
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCheck {
    #[schema(example = true)]
    pub reachable: bool,
    /// ping 소요 시간. 시간 초과 시 제한 시간 (ms)
    #[schema(example = 2)]
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseCheck {
    pub fn state(&self) -> HealthState {
        if self.reachable {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        }
    }
}
