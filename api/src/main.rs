#[macro_use]
extern crate tracing;

mod auth;
mod controllers;
mod error;
mod models;


use clap::Parser;
use models::{MemoryStore, RedisStore, RequestStore};
use profiles::Fixtures;
use redis::Client as RedisClient;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Command {
    /// Service port
    #[arg(long, env = "PORT", default_value_t = 9000)]
    port: u16,

    /// Redis URL, verification requests are kept in memory when not set
    #[arg(long, env = "REDIS_URL")]
    redis: Option<String>,

    /// Fixtures file (api keys & profiles), the builtin fixtures when not set
    #[arg(long, env = "PROFILES_CONFIG")]
    profiles: Option<String>,

    /// Public base url shown in the docs
    #[arg(short, long, env = "DOMAIN", default_value = "http://127.0.0.1:9000")]
    domain: String,

    /// Webhook when a verification completed
    #[arg(long, env = "WEBHOOK")]
    webhook: Option<String>,

    /// Secret for signing webhook payloads
    #[arg(long, env = "WEBHOOK_SECRET", default_value = "whsec_sandbox_demo_2025")]
    webhook_secret: String,

    /// Api key published in the docs
    #[arg(long, env = "SANDBOX_KEY", default_value = "mt_sandbox_employer_2025_demo")]
    sandbox_key: String,

    /// Hide the sandbox credentials from the docs
    #[arg(long, env = "PRODUCTION")]
    production: bool,

    /// Require a registered api key on /verify too
    #[arg(long, env = "STRICT_AUTH")]
    strict: bool,
}

struct AppState {
    fixtures: Fixtures,
    store: Arc<dyn RequestStore>,
    domain: String,
    sandbox_key: String,
    webhook: Option<String>,
    webhook_secret: String,
    production: bool,
    strict: bool,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .init();

    let args = Command::parse();

    // domain check and filer
    let domain = args.domain.trim_end_matches("/").to_owned();

    // load fixtures
    let loaded = match &args.profiles {
        Some(path) => Fixtures::from_file(path),
        None => Fixtures::builtin(),
    };
    let fixtures = match loaded {
        Ok(fixtures) => {
            info!(
                "✅ Fixtures loaded: {} api keys, {} partner tables",
                fixtures.api_keys.len(),
                fixtures.partners.len()
            );
            fixtures
        }
        Err(err) => {
            error!("🔥 Failed to load fixtures: {:?}", err);
            std::process::exit(1);
        }
    };
    if !fixtures.is_known_key(&args.sandbox_key) {
        warn!("Sandbox key {} is not a registered api key", args.sandbox_key);
    }

    // setup request store
    let store: Arc<dyn RequestStore> = match &args.redis {
        Some(url) => match RedisClient::open(url.as_str()) {
            Ok(client) => {
                // try connect to check
                if let Err(err) = client.get_multiplexed_async_connection().await {
                    error!("🔥 Failed to connect to Redis: {:?}", err);
                    std::process::exit(1);
                }
                info!("✅ Redis connection established!");
                Arc::new(RedisStore { redis: client })
            }
            Err(err) => {
                error!("🔥 Failed to connect to Redis: {:?}", err);
                std::process::exit(1);
            }
        },
        None => {
            info!("Verification requests are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let app_state = Arc::new(AppState {
        fixtures,
        store,
        domain,
        sandbox_key: args.sandbox_key,
        webhook: args.webhook,
        webhook_secret: args.webhook_secret,
        production: args.production,
        strict: args.strict,
    });

    let router = controllers::router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("🔥 Failed to bind {}: {:?}", addr, err);
            std::process::exit(1);
        }
    };
    info!("🚀 Server is running on 0.0.0.0:{}", args.port);

    if let Err(err) = axum::serve(listener, router).await {
        error!("🔥 Server error: {:?}", err);
    }
}
