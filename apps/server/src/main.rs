use std::sync::Arc;

use anyhow::Context;
use astroconsult_auth::{AuthError, Authenticator, Caller, Role, User};
use astroconsult_backend_api::{build_router, AppState};
use astroconsult_backend_runtime::{shutdown_signal, telemetry, BackendServices};
use astroconsult_chats::{
    ChatService, ChatStore, MessageService, SendMessageRequest, SqliteChatStore,
};
use astroconsult_config::{load as load_config, AppConfig};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

const DEMO_PASSWORD: &str = "demo-password";
const DEMO_SEEKER_EMAIL: &str = "seeker@demo.astroconsult";
const DEMO_ASTROLOGER_EMAIL: &str = "guru@demo.astroconsult";

#[derive(Parser)]
#[command(name = "astroconsult-backend")]
#[command(about = "AstroConsult consultation backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Create a demo user, a demo astrologer, and a room between them
    SeedDemo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::Migrate => migrate(config).await,
        Commands::SeedDemo => seed_demo(config).await,
    }
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    info!("starting AstroConsult backend");

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = AppState::new(services.db_pool.clone(), &config);
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn migrate(config: AppConfig) -> anyhow::Result<()> {
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(&services.db_pool)
            .await
            .context("failed to read migration history")?;

    println!(
        "Database at {} is up to date ({applied} migrations applied)",
        config.database.url
    );
    Ok(())
}

async fn seed_demo(config: AppConfig) -> anyhow::Result<()> {
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let seeker = ensure_account(
        &services.authenticator,
        DEMO_SEEKER_EMAIL,
        "Demo Seeker",
        Role::User,
    )
    .await?;
    let guru = ensure_account(
        &services.authenticator,
        DEMO_ASTROLOGER_EMAIL,
        "Demo Astrologer",
        Role::Astrologer,
    )
    .await?;

    let store: Arc<dyn ChatStore> = Arc::new(SqliteChatStore::new(services.db_pool.clone()));
    let chats = ChatService::new(store.clone());
    let messages = MessageService::new(store, config.chat.clone());

    let seeker_caller = Caller::new(seeker.public_id.clone(), seeker.role);
    let guru_caller = Caller::new(guru.public_id.clone(), guru.role);

    let (room, created) = chats
        .open_room(&seeker_caller, &guru.public_id)
        .await
        .context("failed to open demo room")?;

    if created {
        messages
            .send_message(
                &guru_caller,
                &SendMessageRequest {
                    room_id: room.id.clone(),
                    content: "Welcome! Share your birth details and we can begin.".to_string(),
                },
            )
            .await
            .context("failed to post demo greeting")?;
    }

    println!("Demo data ready:");
    println!("- user        {DEMO_SEEKER_EMAIL} / {DEMO_PASSWORD} (id {})", seeker.public_id);
    println!("- astrologer  {DEMO_ASTROLOGER_EMAIL} / {DEMO_PASSWORD} (id {})", guru.public_id);
    println!("- room        {}{}", room.id, if created { "" } else { " (already existed)" });

    Ok(())
}

/// Register the account, or sign in to the existing one with the demo password
async fn ensure_account(
    authenticator: &Authenticator,
    email: &str,
    display_name: &str,
    role: Role,
) -> anyhow::Result<User> {
    match authenticator
        .register_with_password(email, DEMO_PASSWORD, Some(display_name), role)
        .await
    {
        Ok(user) => Ok(user),
        Err(AuthError::UserExists) => {
            let session = authenticator
                .login_with_password(email, DEMO_PASSWORD)
                .await
                .with_context(|| format!("{email} exists with a different password"))?;
            Ok(authenticator.user_profile(session.user_id).await?)
        }
        Err(error) => Err(error).with_context(|| format!("failed to register {email}")),
    }
}
