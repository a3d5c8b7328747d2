use car_rental_backend::config::AppConfig;
use car_rental_backend::infrastructure::database;
use car_rental_backend::services::credentials::DatabaseCredentials;
use car_rental_backend::utils::password::hash_password;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Print the PBKDF2 digest of a password, optionally storing it as a user
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Plain-text password to digest
    password: String,

    /// Also insert a `users` row with this name into DATABASE_URL
    #[arg(long)]
    create_user: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hash_password=info,car_rental_backend=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if args.password.is_empty() {
        error!("❌ Refusing to digest an empty password.");
        std::process::exit(1);
    }

    let Some(username) = args.create_user else {
        println!("{}", hash_password(&args.password));
        return Ok(());
    };

    info!("🔌 Connecting to database...");
    let db = database::setup_database(&AppConfig::from_env()).await?;
    let credentials = DatabaseCredentials::new(db);

    match credentials.create_user(&username, &args.password).await {
        Ok(user) => {
            info!("✅ Created user '{}' with id {}", user.username, user.id);
            println!("{}", user.password_hash);
        }
        Err(e) => {
            error!("❌ Failed to create user '{}': {}", username, e);
            std::process::exit(1);
        }
    }

    Ok(())
}
