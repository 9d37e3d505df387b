use chrono::Utc;
use sea_orm::*;
use tracing::info;

use super::dto::{CreateTeamRequest, UpdateTeamRequest};
use super::entity::team;
use crate::global::query::{EntityQuery, ListParams, QueryShaper, ResultSet};

/// 팀 목록에서 필터/검색/정렬이 허용되는 필드
pub const TEAM_FIELDS: [&str; 3] = ["name", "description", "creator_id"];

pub struct TeamService;

impl TeamService {
    /// 삭제되지 않은 팀 조회 쿼리
    pub fn active() -> Select<team::Entity> {
        team::Entity::find().filter(team::Column::DeletedAt.is_null())
    }

    pub async fn get_teams(
        db: &DatabaseConnection,
        params: &ListParams,
    ) -> Result<ResultSet<team::Model>, DbErr> {
        QueryShaper::shape(EntityQuery::new(Self::active(), db), &TEAM_FIELDS, params).await
    }

    /// 요청한 사용자를 생성자로 기록하여 팀을 생성합니다.
    pub async fn create_team(
        db: &DatabaseConnection,
        req: CreateTeamRequest,
        creator_id: i32,
    ) -> Result<team::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let team = team::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            creator_id: Set(creator_id),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(team_id = team.id, creator_id, "Team created");

        Ok(team)
    }

    pub async fn get_team(
        db: &DatabaseConnection,
        team_id: i32,
    ) -> Result<Option<team::Model>, DbErr> {
        Self::active()
            .filter(team::Column::Id.eq(team_id))
            .one(db)
            .await
    }

    pub async fn update_team(
        db: &DatabaseConnection,
        team_id: i32,
        req: UpdateTeamRequest,
    ) -> Result<Option<team::Model>, DbErr> {
        let Some(team) = Self::get_team(db, team_id).await? else {
            return Ok(None);
        };

        let mut active: team::ActiveModel = team.into();
        active.name = Set(req.name);
        active.description = Set(req.description);
        active.updated_at = Set(Utc::now().naive_utc());

        active.update(db).await.map(Some)
    }

    /// soft delete. 소속 관계 행은 그대로 두고, 삭제된 팀은 이후 조회에서 제외됩니다.
    pub async fn delete_team(
        db: &DatabaseConnection,
        team_id: i32,
    ) -> Result<Option<team::Model>, DbErr> {
        let Some(team) = Self::get_team(db, team_id).await? else {
            return Ok(None);
        };

        let now = Utc::now().naive_utc();
        let mut active: team::ActiveModel = team.into();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        let deleted = active.update(db).await?;

        info!(team_id, "Team soft-deleted");

        Ok(Some(deleted))
    }
}
