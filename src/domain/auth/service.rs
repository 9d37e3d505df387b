use chrono::Utc;
use sea_orm::*;
use tracing::info;

use super::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::config::AppConfig;
use crate::domain::user::entity::{personal_access_token, user};
use crate::utils::error::AppError;
use crate::utils::jwt::{encode_token, hash_token};
use crate::utils::password::{hash_password, verify_password};

/// 발급 토큰 이름
const TOKEN_NAME: &str = "auth_token";

pub struct AuthService;

impl AuthService {
    /// 회원가입 후 바로 토큰을 발급합니다.
    pub async fn register(
        db: &DatabaseConnection,
        config: &AppConfig,
        req: RegisterRequest,
    ) -> Result<AuthResponse, AppError> {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(&req.email))
            .one(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict("이미 사용 중인 이메일입니다."));
        }

        let now = Utc::now().naive_utc();
        let new_user = user::ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            password: Set(hash_password(&req.password)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(user_id = new_user.id, "User registered");

        let token = Self::issue_token(db, config, new_user.id).await?;

        Ok(AuthResponse {
            user: UserResponse::from(new_user),
            token,
        })
    }

    /// 로그인. 기존에 발급된 토큰은 모두 폐기하고 새 토큰을 발급합니다.
    pub async fn login(
        db: &DatabaseConnection,
        config: &AppConfig,
        req: LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(&req.email))
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 사용자입니다."))?;

        if !verify_password(&req.password, &found.password)? {
            return Err(AppError::unauthorized("비밀번호가 일치하지 않습니다."));
        }

        Self::revoke_tokens(db, found.id).await?;
        let token = Self::issue_token(db, config, found.id).await?;

        info!(user_id = found.id, "User logged in");

        Ok(AuthResponse {
            user: UserResponse::from(found),
            token,
        })
    }

    /// 사용자의 모든 토큰 폐기
    pub async fn logout(db: &DatabaseConnection, user_id: i32) -> Result<(), AppError> {
        let revoked = Self::revoke_tokens(db, user_id).await?;

        info!(user_id, revoked, "User logged out");

        Ok(())
    }

    pub async fn get_user(db: &DatabaseConnection, user_id: i32) -> Result<UserResponse, AppError> {
        user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::not_found("존재하지 않는 사용자입니다."))
    }

    async fn issue_token(
        db: &DatabaseConnection,
        config: &AppConfig,
        user_id: i32,
    ) -> Result<String, AppError> {
        let token = encode_token(user_id, &config.jwt_secret, config.jwt_expiration)?;

        personal_access_token::ActiveModel {
            user_id: Set(user_id),
            name: Set(TOKEN_NAME.to_string()),
            token_hash: Set(hash_token(&token)),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(token)
    }

    async fn revoke_tokens(db: &DatabaseConnection, user_id: i32) -> Result<u64, AppError> {
        let result = personal_access_token::Entity::delete_many()
            .filter(personal_access_token::Column::UserId.eq(user_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}
