use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::domain::user::entity::personal_access_token;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_token, hash_token};

/// 인증된 사용자 정보를 담는 Extractor
///
/// 서명과 만료를 검증한 뒤, 토큰이 아직 폐기되지 않았는지(`personal_access_tokens`에 남아 있는지) 확인합니다.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    /// 요청에 사용된 토큰의 해시
    pub token_hash: String,
}

/// `Authorization: Bearer <token>` 헤더에서 토큰을 꺼냅니다.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("로그인이 필요합니다."))?
        .to_str()
        .map_err(|_| AppError::unauthorized("잘못된 헤더 형식입니다."))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("토큰 형식이 올바르지 않습니다."))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = decode_token(token, &state.config.jwt_secret)?;
        let user_id = claims.user_id()?;

        let token_hash = hash_token(token);
        let stored = personal_access_token::Entity::find()
            .filter(personal_access_token::Column::TokenHash.eq(&token_hash))
            .filter(personal_access_token::Column::UserId.eq(user_id))
            .one(&state.db)
            .await?;

        if stored.is_none() {
            return Err(AppError::unauthorized("폐기된 토큰입니다."));
        }

        Ok(AuthUser {
            user_id,
            token_hash,
        })
    }
}
