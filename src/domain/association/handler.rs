use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, OriginalUri, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{AddStudentToTeamRequest, AssociationResponse, SuccessAssociationResponse};
use super::service::AssociationService;
#[allow(unused_imports)]
use crate::domain::student::dto::{StudentResponse, SuccessStudentListResponse};
use crate::domain::student::handler::STUDENT_NOT_FOUND;
use crate::domain::student::service::StudentService;
use crate::domain::team::handler::TEAM_NOT_FOUND;
use crate::domain::team::service::TeamService;
use crate::global::query::{params::ListQuery, ListParams};
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ListResponse;
#[allow(unused_imports)]
use crate::utils::ErrorResponse;
use crate::utils::BaseResponse;

async fn ensure_team_exists(state: &AppState, team_id: i32) -> Result<(), AppError> {
    TeamService::get_team(&state.db, team_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found(TEAM_NOT_FOUND))
}

/// 팀 소속 학생 목록 조회 API
///
/// 필터/정렬 가능 필드: name, email, cpf, ra (`students.` 접두사 허용)
#[utoipa::path(
    get,
    path = "/api/teams/{id}/students",
    params(("id" = i32, Path, description = "팀 ID"), ListQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "목록 조회 성공", body = SuccessStudentListResponse),
        (status = 404, description = "존재하지 않는 팀", body = ErrorResponse)
    ),
    tag = "TeamStudent"
)]
pub async fn list_team_students(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
    OriginalUri(uri): OriginalUri,
    params: ListParams,
) -> Result<Json<BaseResponse<ListResponse<StudentResponse>>>, AppError> {
    let Path(team_id) = path?;
    ensure_team_exists(&state, team_id).await?;

    let students = AssociationService::list_students_by_team(&state.db, team_id, &params).await?;

    Ok(Json(BaseResponse::success(ListResponse::from_result(
        students.map(StudentResponse::from),
        &uri,
    ))))
}

/// 팀에 학생 추가 API
///
/// 이미 소속된 학생이면 기존 관계를 그대로 반환합니다.
#[utoipa::path(
    post,
    path = "/api/teams/{id}/students",
    params(("id" = i32, Path, description = "팀 ID")),
    request_body = AddStudentToTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "추가 성공", body = SuccessAssociationResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 팀 또는 학생", body = ErrorResponse)
    ),
    tag = "TeamStudent"
)]
pub async fn add_student_to_team(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<AddStudentToTeamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<AssociationResponse>>), AppError> {
    let Path(team_id) = path?;
    let Json(req) = body?;
    req.validate()?;

    ensure_team_exists(&state, team_id).await?;
    StudentService::get_student(&state.db, req.student_id)
        .await?
        .ok_or_else(|| AppError::not_found(STUDENT_NOT_FOUND))?;

    let association =
        AssociationService::add_student_to_team(&state.db, team_id, req.student_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(BaseResponse::created(AssociationResponse::from(association))),
    ))
}

/// 팀에서 학생 제외 API
///
/// 소속 관계가 없어도 204를 반환합니다.
#[utoipa::path(
    delete,
    path = "/api/teams/{id}/students/{student_id}",
    params(
        ("id" = i32, Path, description = "팀 ID"),
        ("student_id" = i32, Path, description = "학생 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "제외 성공"),
        (status = 404, description = "존재하지 않는 팀", body = ErrorResponse)
    ),
    tag = "TeamStudent"
)]
pub async fn remove_student_from_team(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path((team_id, student_id)) = path?;
    ensure_team_exists(&state, team_id).await?;

    AssociationService::remove_student_from_team(&state.db, team_id, student_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
