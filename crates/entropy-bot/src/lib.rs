//! Telegram transport for the Entropy wallet bot.
//!
//! Long-polls getUpdates, maps updates into flow events, and renders
//! the flow's instructions back as messages, inline keyboards and
//! photo uploads. All conversation logic lives in `entropy-core`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use entropy_core::config::Config;
use entropy_core::flow::ConversationFlow;
use entropy_core::oracle::CoingeckoOracle;
use entropy_core::qr::QrServerRenderer;

use crate::bot::{BotContext, dispatch_event, new_participant_queues};
use crate::handlers::event::parse_update;
use crate::telegram::{TelegramClient, TelegramSettings};

mod bot;
mod handlers;
mod telegram;

pub async fn run() -> Result<()> {
    let config = Config::load().map_err(|_| anyhow!("Failed to load entropy config"))?;
    let settings = TelegramSettings::from_config(&config)?;
    let config_path = entropy_core::config::paths::config_path();
    if config_path.exists() {
        eprintln!("Config file: {}", config_path.display());
    }
    run_bot(config, settings).await
}

async fn run_bot(config: Config, settings: TelegramSettings) -> Result<()> {
    let client = TelegramClient::new(settings.bot_token);
    let oracle = CoingeckoOracle::new(&config);
    let qr = QrServerRenderer::new(&config);
    let flow = ConversationFlow::new(oracle, qr, config.asset_ticker.clone());
    let context = Arc::new(BotContext::new(client.clone(), flow));
    let queues = new_participant_queues();

    let mut offset: Option<i64> = None;
    let poll_timeout = Duration::from_secs(30);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    eprintln!(
        "entropy-bot started. Asset: {} ({}). Polling for updates...",
        config.asset_ticker, config.asset_symbol
    );

    loop {
        let current_offset = offset;
        tokio::select! {
            _ = &mut shutdown => {
                eprintln!("Shutting down Telegram bot.");
                break;
            }
            updates = client.get_updates(current_offset, poll_timeout) => {
                let updates = match updates {
                    Ok(updates) => updates,
                    Err(err) => {
                        eprintln!("Telegram polling error: {}", err);
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        continue;
                    }
                };

                if !updates.is_empty() {
                    eprintln!("Received {} update(s)", updates.len());
                }
                for update in updates {
                    offset = Some(update.update_id + 1);
                    if let Some(event) = parse_update(update) {
                        dispatch_event(&queues, &context, event).await;
                    }
                }
            }
        }
    }

    Ok(())
}
