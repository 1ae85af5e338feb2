mod bot;
mod config;

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::prelude::*;

use bot::{Engine, InboundEvent, TelegramDelivery};
use config::Config;

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "omnibot.json".to_string());

    // Config problems are fatal: nothing can run without credentials.
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Setup logging: stdout plus an append-only file under data_dir.
    let log_dir = config.data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("omnibot.log"))
        .expect("Failed to open log file");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .init();

    info!("Starting omnibot...");
    info!("Loaded config from {config_path}");
    if config.city_id.is_some() || config.country_code.is_some() {
        info!(
            "Static location fallback: country={:?}, city_id={:?}",
            config.country_code, config.city_id
        );
    }

    let bot = Bot::new(&config.telegram_bot_token);
    let engine = Arc::new(Engine::new(&config, TelegramDelivery::new(bot.clone())));

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    // The default dispatcher distribution keys updates by chat, so replies
    // to one chat stay in inbound order while chats proceed independently.
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_message(
    msg: Message,
    engine: Arc<Engine<TelegramDelivery>>,
) -> ResponseResult<()> {
    let Some(event) = InboundEvent::from_message(&msg) else {
        return Ok(());
    };

    if event.command.is_none() && event.text.is_empty() {
        return Ok(());
    }

    engine.handle_event(event).await;
    Ok(())
}
