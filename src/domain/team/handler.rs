use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, OriginalUri, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    CreateTeamRequest, SuccessTeamListResponse, SuccessTeamResponse, TeamResponse,
    UpdateTeamRequest,
};
use super::service::TeamService;
use crate::global::query::{params::ListQuery, ListParams};
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ListResponse;
#[allow(unused_imports)]
use crate::utils::ErrorResponse;
use crate::utils::BaseResponse;

pub(crate) const TEAM_NOT_FOUND: &str = "존재하지 않는 팀입니다.";

/// 팀 목록 조회 API
///
/// 필터/정렬 가능 필드: name, description, creator_id
#[utoipa::path(
    get,
    path = "/api/teams",
    params(ListQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "목록 조회 성공", body = SuccessTeamListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Team"
)]
pub async fn list_teams(
    State(state): State<AppState>,
    _user: AuthUser,
    OriginalUri(uri): OriginalUri,
    params: ListParams,
) -> Result<Json<BaseResponse<ListResponse<TeamResponse>>>, AppError> {
    let teams = TeamService::get_teams(&state.db, &params).await?;

    Ok(Json(BaseResponse::success(ListResponse::from_result(
        teams.map(TeamResponse::from),
        &uri,
    ))))
}

/// 팀 생성 API
///
/// 인증된 사용자가 팀의 생성자로 기록됩니다.
#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "팀 생성 성공", body = SuccessTeamResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Team"
)]
pub async fn create_team(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<TeamResponse>>), AppError> {
    let Json(req) = body?;
    req.validate()?;

    let team = TeamService::create_team(&state.db, req, user.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(BaseResponse::created(TeamResponse::from(team))),
    ))
}

/// 팀 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(("id" = i32, Path, description = "팀 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessTeamResponse),
        (status = 404, description = "존재하지 않는 팀", body = ErrorResponse)
    ),
    tag = "Team"
)]
pub async fn get_team(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<BaseResponse<TeamResponse>>, AppError> {
    let Path(team_id) = path?;

    let team = TeamService::get_team(&state.db, team_id)
        .await?
        .ok_or_else(|| AppError::not_found(TEAM_NOT_FOUND))?;

    Ok(Json(BaseResponse::success(TeamResponse::from(team))))
}

/// 팀 수정 API
#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(("id" = i32, Path, description = "팀 ID")),
    request_body = UpdateTeamRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "수정 성공", body = SuccessTeamResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 팀", body = ErrorResponse)
    ),
    tag = "Team"
)]
pub async fn update_team(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateTeamRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<TeamResponse>>, AppError> {
    let Path(team_id) = path?;
    let Json(req) = body?;
    req.validate()?;

    let team = TeamService::update_team(&state.db, team_id, req)
        .await?
        .ok_or_else(|| AppError::not_found(TEAM_NOT_FOUND))?;

    Ok(Json(BaseResponse::success(TeamResponse::from(team))))
}

/// 팀 삭제 API (soft delete)
#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(("id" = i32, Path, description = "팀 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "삭제 성공"),
        (status = 404, description = "존재하지 않는 팀", body = ErrorResponse)
    ),
    tag = "Team"
)]
pub async fn delete_team(
    State(state): State<AppState>,
    _user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(team_id) = path?;

    TeamService::delete_team(&state.db, team_id)
        .await?
        .ok_or_else(|| AppError::not_found(TEAM_NOT_FOUND))?;

    Ok(StatusCode::NO_CONTENT)
}
