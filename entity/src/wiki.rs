use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "wiki")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub language: Option<String>,
    pub project: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_wiki::Entity")]
    CourseWiki,
}

impl Related<super::course_wiki::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseWiki.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
