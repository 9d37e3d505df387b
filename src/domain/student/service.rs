use chrono::Utc;
use sea_orm::*;
use tracing::info;

use super::dto::{CreateStudentRequest, UpdateStudentRequest};
use super::entity::student;
use crate::global::query::{EntityQuery, ListParams, QueryShaper, ResultSet};

/// 학생 목록에서 필터/검색/정렬이 허용되는 필드
pub const STUDENT_FIELDS: [&str; 4] = ["name", "email", "cpf", "ra"];

pub struct StudentService;

impl StudentService {
    /// 삭제되지 않은 학생 조회 쿼리
    pub fn active() -> Select<student::Entity> {
        student::Entity::find().filter(student::Column::DeletedAt.is_null())
    }

    pub async fn get_students(
        db: &DatabaseConnection,
        params: &ListParams,
    ) -> Result<ResultSet<student::Model>, DbErr> {
        QueryShaper::shape(EntityQuery::new(Self::active(), db), &STUDENT_FIELDS, params).await
    }

    pub async fn create_student(
        db: &DatabaseConnection,
        req: CreateStudentRequest,
    ) -> Result<student::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let student = student::ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            cpf: Set(req.cpf),
            ra: Set(req.ra),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(student_id = student.id, "Student created");

        Ok(student)
    }

    pub async fn get_student(
        db: &DatabaseConnection,
        student_id: i32,
    ) -> Result<Option<student::Model>, DbErr> {
        Self::active()
            .filter(student::Column::Id.eq(student_id))
            .one(db)
            .await
    }

    /// 전달된 필드만 변경합니다. 학생이 없으면 `None`.
    pub async fn update_student(
        db: &DatabaseConnection,
        student_id: i32,
        req: UpdateStudentRequest,
    ) -> Result<Option<student::Model>, DbErr> {
        let Some(student) = Self::get_student(db, student_id).await? else {
            return Ok(None);
        };

        let mut active: student::ActiveModel = student.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(email) = req.email {
            active.email = Set(email);
        }
        if let Some(cpf) = req.cpf {
            active.cpf = Set(cpf);
        }
        if let Some(ra) = req.ra {
            active.ra = Set(ra);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        active.update(db).await.map(Some)
    }

    /// soft delete 후 삭제된 학생을 반환합니다. 학생이 없으면 `None`.
    pub async fn delete_student(
        db: &DatabaseConnection,
        student_id: i32,
    ) -> Result<Option<student::Model>, DbErr> {
        let Some(student) = Self::get_student(db, student_id).await? else {
            return Ok(None);
        };

        let now = Utc::now().naive_utc();
        let mut active: student::ActiveModel = student.into();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        let deleted = active.update(db).await?;

        info!(student_id, "Student soft-deleted");

        Ok(Some(deleted))
    }
}
