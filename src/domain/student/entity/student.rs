use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub ra: String,
    /// soft delete 시각 (NULL이면 유효한 학생)
    pub deleted_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        has_many = "crate::domain::association::entity::team_student_association::Entity"
    )]
    TeamStudentAssociation,
}

impl Related<crate::domain::association::entity::team_student_association::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamStudentAssociation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
