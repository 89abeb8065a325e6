use anyhow::{Context, Result};
use db_pool::create_pool;
use entity_service::db::{schema, EntityRepository};
use entity_service::models::tags_property;
use entity_service::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "entity-service";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.env);

    let tags = tags_property().context("Invalid tags column registration")?;

    config.database.log_config();
    let pool = create_pool(config.database.clone())
        .await
        .context("Failed to connect to database")?;

    if config.schema.recreate_on_startup {
        schema::recreate(&pool, &tags)
            .await
            .context("Failed to recreate schema")?;
    } else {
        schema::ensure_created(&pool, &tags)
            .await
            .context("Failed to create schema")?;
    }

    tags.verify_column(&pool)
        .await
        .context("Tags column does not match its registration")?;

    let repo = EntityRepository::new(
        pool.clone(),
        tags,
        config.schema.tags_null_policy,
        config.logging.sensitive_data,
    );
    let entities = repo.list_entities().await.context("Failed to load entities")?;

    if config.logging.sensitive_data {
        info!(
            count = entities.len(),
            entities = %serde_json::to_string(&entities)?,
            "Loaded entities"
        );
    } else {
        info!(count = entities.len(), "Loaded entities");
    }

    pool.close().await;
    info!("{} finished", SERVICE_NAME);
    Ok(())
}
