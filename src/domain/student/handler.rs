use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, OriginalUri, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    CreateStudentRequest, StudentResponse, SuccessStudentListResponse, SuccessStudentResponse,
    UpdateStudentRequest,
};
use super::service::StudentService;
use crate::global::query::{params::ListQuery, ListParams};
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ListResponse;
#[allow(unused_imports)]
use crate::utils::ErrorResponse;
use crate::utils::BaseResponse;

pub(crate) const STUDENT_NOT_FOUND: &str = "존재하지 않는 학생입니다.";

/// 학생 목록 조회 API
///
/// `filter[필드]`, `search`, `sortBy`, `sortOrder`, `pageSize`, `page` 쿼리 파라미터를 지원합니다.
/// 필터/정렬 가능 필드: name, email, cpf, ra
#[utoipa::path(
    get,
    path = "/api/students",
    params(ListQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "목록 조회 성공", body = SuccessStudentListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 500, description = "서버 내부 오류", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn list_students(
    State(state): State<AppState>,
    _user: AuthUser,
    OriginalUri(uri): OriginalUri,
    params: ListParams,
) -> Result<Json<BaseResponse<ListResponse<StudentResponse>>>, AppError> {
    let students = StudentService::get_students(&state.db, &params).await?;

    Ok(Json(BaseResponse::success(ListResponse::from_result(
        students.map(StudentResponse::from),
        &uri,
    ))))
}

/// 학생 생성 API
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "학생 생성 성공", body = SuccessStudentResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn create_student(
    State(state): State<AppState>,
    _user: AuthUser,
    body: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<StudentResponse>>), AppError> {
    let Json(req) = body?;
    req.validate()?;

    let student = StudentService::create_student(&state.db, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(BaseResponse::created(StudentResponse::from(student))),
    ))
}

/// 학생 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "학생 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessStudentResponse),
        (status = 404, description = "존재하지 않는 학생", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn get_student(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<BaseResponse<StudentResponse>>, AppError> {
    let Path(student_id) = path?;

    let student = StudentService::get_student(&state.db, student_id)
        .await?
        .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND))?;

    Ok(Json(BaseResponse::success(StudentResponse::from(student))))
}

/// 학생 수정 API
///
/// 요청에 포함된 필드만 변경합니다.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "학생 ID")),
    request_body = UpdateStudentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "수정 성공", body = SuccessStudentResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 학생", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn update_student(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<StudentResponse>>, AppError> {
    let Path(student_id) = path?;
    let Json(req) = body?;
    req.validate()?;

    let student = StudentService::update_student(&state.db, student_id, req)
        .await?
        .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND))?;

    Ok(Json(BaseResponse::success(StudentResponse::from(student))))
}

/// 학생 삭제 API (soft delete)
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "학생 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "삭제 성공"),
        (status = 404, description = "존재하지 않는 학생", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(student_id) = path?;

    StudentService::delete_student(&state.db, student_id)
        .await?
        .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND))?;

    Ok(StatusCode::NO_CONTENT)
}
