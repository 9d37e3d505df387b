use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::team_student_association as association;

/// 팀에 학생 추가 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddStudentToTeamRequest {
    #[validate(range(min = 1, message = "학생 ID는 1 이상이어야 합니다"))]
    #[serde(alias = "student_id")]
    #[schema(example = 1)]
    pub student_id: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssociationResponse {
    pub id: i32,
    pub team_id: i32,
    pub student_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<association::Model> for AssociationResponse {
    fn from(model: association::Model) -> Self {
        Self {
            id: model.id,
            team_id: model.team_id,
            student_id: model.student_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 팀 학생 추가 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessAssociationResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: AssociationResponse,
}
