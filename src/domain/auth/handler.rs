use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

#[allow(unused_imports)]
use super::dto::{
    AuthResponse, LoginRequest, RegisterRequest, SuccessAuthResponse, SuccessUserResponse,
    UserResponse,
};
use super::service::AuthService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
#[allow(unused_imports)]
use crate::utils::ErrorResponse;
use crate::utils::BaseResponse;

/// 회원가입 API
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "회원가입 성공", body = SuccessAuthResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "이미 사용 중인 이메일", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BaseResponse<AuthResponse>>), AppError> {
    let Json(req) = body?;
    req.validate()?;

    let result = AuthService::register(&state.db, &state.config, req).await?;

    Ok((StatusCode::CREATED, Json(BaseResponse::created(result))))
}

/// 로그인 API
///
/// 이전에 발급된 토큰은 모두 폐기됩니다.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = SuccessAuthResponse),
        (status = 401, description = "비밀번호 불일치", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<AuthResponse>>, AppError> {
    let Json(req) = body?;
    req.validate()?;

    let result = AuthService::login(&state.db, &state.config, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "로그인에 성공했습니다.",
    )))
}

/// 로그아웃 API
#[utoipa::path(
    post,
    path = "/api/logout",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "로그아웃 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<()>>, AppError> {
    AuthService::logout(&state.db, user.user_id).await?;

    Ok(Json(BaseResponse::success_with_message(
        (),
        "로그아웃되었습니다.",
    )))
}

/// 현재 사용자 조회 API
#[utoipa::path(
    get,
    path = "/api/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조회 성공", body = SuccessUserResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let result = AuthService::get_user(&state.db, user.user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
