use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "course_user_wiki_timeslice")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub user_id: i64,
    pub wiki_id: i32,
    pub start: DateTime,
    pub end: DateTime,
    pub character_sum_ms: i64,
    pub character_sum_us: i64,
    pub character_sum_draft: i64,
    pub references_count: i64,
    pub revision_count: i64,
    pub total_uploads: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::wiki::Entity",
        from = "Column::WikiId",
        to = "super::wiki::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Wiki,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
