//! Process startup helpers for embedding applications.

use std::sync::Arc;

use dioxus_logger::tracing::Level;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::JobScheduler;

use crate::{
    adapter::{ConfiguredFeatures, RevisionSource, StatusAnnotator, UploadSource},
    config::Config,
    error::Error,
    scheduler::start_scheduler,
    service::orchestrator::UpdateContext,
};

/// Load configuration from `.env` and the process environment
pub fn load_config() -> Result<Config, Error> {
    dotenvy::dotenv().ok();

    Ok(Config::from_env()?)
}

/// Install the global `tracing` subscriber
pub fn init_logging(level: Level) -> Result<(), Error> {
    dioxus_logger::init(level)
        .map_err(|e| Error::InternalError(format!("Failed to initialize logger: {}", e)))
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the update context and start the periodic course update job
pub async fn start_course_updates(
    config: &Config,
    db: DatabaseConnection,
    revisions: Arc<dyn RevisionSource>,
    uploads: Arc<dyn UploadSource>,
    annotator: Arc<dyn StatusAnnotator>,
) -> Result<JobScheduler, Error> {
    let ctx = UpdateContext::new(db, config.update.clone(), revisions, uploads, annotator)
        .with_features(Arc::new(ConfiguredFeatures {
            status_annotation: config.supports_status_annotation,
        }));

    start_scheduler(ctx, config.scheduler.clone()).await
}
