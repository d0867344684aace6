use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teamtask::api::{self, middleware::SecurityConfig};
use teamtask::config::ServerConfig;
use teamtask::db::Database;
use teamtask::workload::{Rebalancer, SweepError};

#[derive(Parser)]
#[command(name = "teamtask")]
#[command(about = "Team task management with capacity-aware assignment")]
struct Cli {
    /// Database file (overrides TEAMTASK_DATABASE)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port for HTTP API (overrides TEAMTASK_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run one rebalancing sweep and print the result
    Rebalance {
        /// Principal id recorded on the activity log
        #[arg(long, default_value = "cli")]
        user: String,
    },
    /// Apply database migrations and exit
    Migrate,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "teamtask=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_database(config: &ServerConfig) -> anyhow::Result<Database> {
    let db = match &config.database_path {
        Some(path) => Database::open(path.clone())?,
        None => Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = open_database(&config)?;
    let security = SecurityConfig::from_env();

    if let Some(limiter) = security.rate_limiter.clone() {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(limiter.window());
            loop {
                interval.tick().await;
                limiter.cleanup();
            }
        });
    }

    let app = api::create_router_with_security(db, security);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("teamtask server listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env();
    if let Some(path) = cli.database {
        config.database_path = Some(path);
    }

    match cli.command {
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
        }
        Some(Commands::Rebalance { user }) => {
            let db = open_database(&config)?;
            match Rebalancer::new().run_sweep(&db, &user) {
                Ok(report) => {
                    println!("{}", report.message);
                    for r in &report.reassignments {
                        println!(
                            "  [{}] {}: {} -> {}",
                            r.team_name, r.task_title, r.from_member, r.to_member
                        );
                    }
                }
                Err(SweepError::Aborted { committed, source }) => {
                    eprintln!(
                        "Sweep failed after {} reassignment(s); those moves were kept.",
                        committed.len()
                    );
                    return Err(source);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Some(Commands::Migrate) => {
            open_database(&config)?;
            println!("Database is up to date");
        }
        None => {
            serve(config).await?;
        }
    }

    Ok(())
}
