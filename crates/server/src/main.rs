use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tracing_subscriber::EnvFilter;

use everycheese::api::{self, AppState};
use everycheese::auth::{SessionStore, db::create_user};
use everycheese::cheese::db::count_cheeses;
use everycheese::config::{Config, loader};
use everycheese::db;
use everycheese::supervisor::Supervisor;
use everycheese::test_helpers::CheeseFactory;

const DEFAULT_LOG_FILTER: &str = "everycheese=info,tower_http=info";

#[derive(Parser)]
#[command(name = "everycheese")]
#[command(about = "EveryCheese - a catalogue of cheeses", long_about = None)]
struct Cli {
    /// Path to a RON config file (overrides discovery)
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8000
        #[arg(long)]
        bind: Option<String>,
    },
    #[command(subcommand)]
    User(UserCommands),
    /// Insert randomly generated cheeses
    Seed {
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a user and print a session token for it
    Create {
        username: String,
        #[arg(long)]
        email: Option<String>,
        /// Mark the user as staff
        #[arg(long)]
        staff: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => loader::load_from_file(path)?,
        None => loader::load_with_discovery()?,
    };

    let database = config.database.clone().with_env_overrides();
    let (pool, _db_root) = db::init_pool(&database).await?;

    match cli.command {
        Commands::Serve { bind } => serve(pool, &config, bind).await?,
        Commands::User(UserCommands::Create {
            username,
            email,
            staff,
        }) => create_user_with_session(&pool, &username, email.as_deref(), staff).await?,
        Commands::Seed { count } => seed(&pool, count).await?,
    }

    Ok(())
}

async fn serve(pool: SqlitePool, config: &Config, bind: Option<String>) -> Result<()> {
    let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let state = AppState::new(pool);

    let mut supervisor = Supervisor::new();
    supervisor.spawn("api", move |shutdown| async move {
        api::run_api(state, &bind_addr, shutdown).await
    });
    supervisor.run().await
}

async fn create_user_with_session(
    pool: &SqlitePool,
    username: &str,
    email: Option<&str>,
    staff: bool,
) -> Result<()> {
    let user = create_user(pool, username, email, staff)
        .await
        .with_context(|| format!("failed to create user `{username}`"))?;
    let token = SessionStore::new(pool.clone())
        .create_session(&user.id)
        .await?;

    println!("✓ User created successfully!");
    println!("  ID:       {}", user.id);
    println!("  Username: {}", user.username);
    println!("  Session:  {}", token);

    Ok(())
}

async fn seed(pool: &SqlitePool, count: usize) -> Result<()> {
    let cheeses = CheeseFactory::new().create_batch(pool, count).await?;
    for cheese in &cheeses {
        println!("  {} ({})", cheese, cheese.slug);
    }
    println!("✓ Seeded {} cheeses, {} in total", cheeses.len(), count_cheeses(pool).await?);

    Ok(())
}
