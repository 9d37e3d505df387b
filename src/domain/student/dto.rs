use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::entity::student;

/// CPF 형식 검증 (구분자 없는 숫자 11자리)
fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    if cpf.len() == 11 && cpf.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("cpf_invalid"))
    }
}

/// 학생 생성 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 255, message = "이름은 1~255자여야 합니다"))]
    #[schema(example = "John Doe")]
    pub name: String,

    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    #[schema(example = "johndoe@example.com")]
    pub email: String,

    #[validate(custom(function = "validate_cpf", message = "CPF는 숫자 11자리여야 합니다"))]
    #[schema(example = "12345678901")]
    pub cpf: String,

    #[validate(length(min = 1, max = 20, message = "RA는 1~20자여야 합니다"))]
    #[schema(example = "123456")]
    pub ra: String,
}

/// 학생 수정 요청 DTO (전달된 필드만 변경)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, max = 255, message = "이름은 1~255자여야 합니다"))]
    pub name: Option<String>,

    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_cpf", message = "CPF는 숫자 11자리여야 합니다"))]
    pub cpf: Option<String>,

    #[validate(length(min = 1, max = 20, message = "RA는 1~20자여야 합니다"))]
    pub ra: Option<String>,
}

/// 학생 응답 DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub ra: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            cpf: model.cpf,
            ra: model.ra,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 학생 조회 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStudentResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: StudentResponse,
}

/// 학생 목록 조회 성공 응답 (Swagger 문서용)
///
/// `pageSize`를 지정하면 `result`는 `{ data, meta, links }` 형태가 됩니다.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStudentListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<StudentResponse>,
}
