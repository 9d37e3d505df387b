use chrono::Utc;
use sea_orm::{sea_query::Query, *};
use tracing::{debug, info};

use super::entity::team_student_association as association;
use crate::domain::student::{entity::student, service::StudentService};
use crate::global::query::{EntityQuery, ListParams, QueryShaper, ResultSet};

/// 팀 소속 학생 목록에서 허용되는 필드 (students 테이블 기준)
pub const TEAM_STUDENT_FIELDS: [&str; 4] = [
    "students.name",
    "students.email",
    "students.cpf",
    "students.ra",
];

/// 팀-학생 소속 관계 관리
///
/// 추가는 멱등, 해제는 존재할 때만 삭제합니다.
/// 조회와 쓰기 사이에 잠금이 없으므로 동시에 같은 쌍을 추가하면 행이 중복될 수 있습니다.
pub struct AssociationService;

impl AssociationService {
    pub async fn find_association(
        db: &DatabaseConnection,
        team_id: i32,
        student_id: i32,
    ) -> Result<Option<association::Model>, DbErr> {
        association::Entity::find()
            .filter(association::Column::TeamId.eq(team_id))
            .filter(association::Column::StudentId.eq(student_id))
            .one(db)
            .await
    }

    /// 이미 소속되어 있으면 기존 관계를 그대로 반환하고, 없으면 새로 생성합니다.
    pub async fn add_student_to_team(
        db: &DatabaseConnection,
        team_id: i32,
        student_id: i32,
    ) -> Result<association::Model, DbErr> {
        if let Some(existing) = Self::find_association(db, team_id, student_id).await? {
            debug!(team_id, student_id, "Student already in team");
            return Ok(existing);
        }

        let now = Utc::now().naive_utc();
        let created = association::ActiveModel {
            team_id: Set(team_id),
            student_id: Set(student_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(team_id, student_id, "Student added to team");

        Ok(created)
    }

    /// 소속 관계를 삭제하고 삭제된 행을 반환합니다. 관계가 없으면 `None`.
    pub async fn remove_student_from_team(
        db: &DatabaseConnection,
        team_id: i32,
        student_id: i32,
    ) -> Result<Option<association::Model>, DbErr> {
        let Some(existing) = Self::find_association(db, team_id, student_id).await? else {
            return Ok(None);
        };

        association::Entity::delete_by_id(existing.id)
            .exec(db)
            .await?;

        info!(team_id, student_id, "Student removed from team");

        Ok(Some(existing))
    }

    /// 팀에 한 번 이상 소속된 (삭제되지 않은) 학생 목록
    pub async fn list_students_by_team(
        db: &DatabaseConnection,
        team_id: i32,
        params: &ListParams,
    ) -> Result<ResultSet<student::Model>, DbErr> {
        let member_ids = Query::select()
            .column(association::Column::StudentId)
            .from(association::Entity)
            .and_where(association::Column::TeamId.eq(team_id))
            .to_owned();

        let select = StudentService::active().filter(student::Column::Id.in_subquery(member_ids));

        QueryShaper::shape(EntityQuery::new(select, db), &TEAM_STUDENT_FIELDS, params).await
    }
}
