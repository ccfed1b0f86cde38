use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "article_course_timeslice")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub articles_courses_id: i32,
    pub start: DateTime,
    pub end: DateTime,
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
    #[sea_orm(
        belongs_to = "super::articles_courses::Entity",
        from = "Column::ArticlesCoursesId",
        to = "super::articles_courses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ArticlesCourses,
}

impl Related<super::articles_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticlesCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
