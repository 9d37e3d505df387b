use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::team;

/// 팀 생성 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 255, message = "팀 이름은 1~255자여야 합니다"))]
    #[schema(example = "Team A")]
    pub name: String,

    #[validate(length(max = 1000, message = "팀 설명은 1000자 이하여야 합니다"))]
    #[schema(example = "Team A description")]
    pub description: Option<String>,
}

/// 팀 수정 요청 DTO
///
/// 이름과 설명을 요청 값으로 덮어씁니다. `description`을 생략하면 비워집니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 255, message = "팀 이름은 1~255자여야 합니다"))]
    #[schema(example = "Team B")]
    pub name: String,

    #[validate(length(max = 1000, message = "팀 설명은 1000자 이하여야 합니다"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<team::Model> for TeamResponse {
    fn from(model: team::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            creator_id: model.creator_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 팀 조회 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessTeamResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: TeamResponse,
}

/// 팀 목록 조회 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessTeamListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<TeamResponse>,
}
