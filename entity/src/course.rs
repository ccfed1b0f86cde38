use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    pub start: DateTime,
    pub end: DateTime,
    pub debug_updates: bool,
    pub longest_update_secs: Option<i64>,
    pub character_sum: i64,
    pub references_count: i64,
    pub revision_count: i64,
    pub upload_count: i64,
    pub uploads_in_use_count: i64,
    pub upload_usages_count: i64,
    pub user_count: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::articles_courses::Entity")]
    ArticlesCourses,
    #[sea_orm(has_many = "super::course_update_log::Entity")]
    CourseUpdateLog,
    #[sea_orm(has_many = "super::course_user::Entity")]
    CourseUser,
    #[sea_orm(has_many = "super::course_user_wiki_timeslice::Entity")]
    CourseUserWikiTimeslice,
    #[sea_orm(has_many = "super::course_wiki::Entity")]
    CourseWiki,
    #[sea_orm(has_many = "super::course_wiki_timeslice::Entity")]
    CourseWikiTimeslice,
}

impl Related<super::articles_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticlesCourses.def()
    }
}

impl Related<super::course_update_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseUpdateLog.def()
    }
}

impl Related<super::course_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseUser.def()
    }
}

impl Related<super::course_wiki::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseWiki.def()
    }
}

impl Related<super::course_wiki_timeslice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseWikiTimeslice.def()
    }
}

impl Related<super::wiki::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_wiki::Relation::Wiki.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_wiki::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
