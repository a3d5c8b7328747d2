use crate::config::AppConfig;
use crate::entities::{categories, users, vehicles};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

pub async fn setup_database(config: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let db_url = &config.database_url;
    info!("📂 Database: {}", db_url);

    let mut opt = ConnectOptions::new(db_url);
    if db_url.contains(":memory:") {
        // Every pooled connection to an in-memory SQLite database sees its own empty database
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(20)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800));
    }
    opt.connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    info!("✅ Database connected successfully");

    run_migrations(&db).await?;

    Ok(db)
}

/// Create missing tables from the entity definitions
pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    info!("🔄 Running auto-migrations...");

    // Order matters for foreign keys: Categories -> Vehicles
    let stmts = vec![
        (
            "users",
            schema
                .create_table_from_entity(users::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "categories",
            schema
                .create_table_from_entity(categories::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "vehicles",
            schema
                .create_table_from_entity(vehicles::Entity)
                .if_not_exists()
                .to_owned(),
        ),
    ];

    for (name, stmt) in stmts {
        db.execute(builder.build(&stmt))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create table '{}': {}", name, e))?;
        info!("   - Table '{}' checked/created", name);
    }

    Ok(())
}
