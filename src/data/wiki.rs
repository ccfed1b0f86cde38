use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::model::db::WikiModel;

pub struct WikiRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WikiRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Find a wiki by its (language, project) identity
    pub async fn find(
        &self,
        language: Option<&str>,
        project: &str,
    ) -> Result<Option<WikiModel>, DbErr> {
        let language_filter = match language {
            Some(language) => entity::wiki::Column::Language.eq(language),
            None => entity::wiki::Column::Language.is_null(),
        };

        entity::prelude::Wiki::find()
            .filter(language_filter)
            .filter(entity::wiki::Column::Project.eq(project))
            .one(self.db)
            .await
    }

    /// Return the wiki with the given identity, inserting it when absent
    pub async fn get_or_create(
        &self,
        language: Option<&str>,
        project: &str,
    ) -> Result<WikiModel, DbErr> {
        if let Some(wiki) = self.find(language, project).await? {
            return Ok(wiki);
        }

        let wiki = entity::wiki::ActiveModel {
            language: ActiveValue::Set(language.map(str::to_string)),
            project: ActiveValue::Set(project.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        wiki.insert(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<WikiModel>, DbErr> {
        entity::prelude::Wiki::find_by_id(id).one(self.db).await
    }
}
