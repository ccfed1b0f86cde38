use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error("Fixture references unknown course slug: {0}")]
    UnknownCourse(String),
    #[error("Fixture references unknown wiki: {0}")]
    UnknownWiki(String),
}
