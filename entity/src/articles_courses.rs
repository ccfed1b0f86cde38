use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "articles_courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub wiki_id: i32,
    pub article_id: i64,
    pub tracked: bool,
    pub character_sum: i64,
    pub references_count: i64,
    pub revision_count: i64,
    /// JSON array of contributing user ids.
    #[sea_orm(column_type = "Text")]
    pub user_ids: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::article_course_timeslice::Entity")]
    ArticleCourseTimeslice,
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

impl Related<super::article_course_timeslice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleCourseTimeslice.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
