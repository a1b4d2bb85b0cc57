//! Telegram transport for the expense ledger.
//!
//! Free-text messages are interpreted into expenses, edits are reconciled
//! against the ledger ("latest edit wins") and replies to a stored message
//! can delete it. The storage engine and the extraction oracle are opened
//! once at startup and handed to every handler by parameter, never looked up
//! from global state.

use std::sync::Arc;

use teloxide::prelude::*;

pub use extractor::OracleClient;

mod commands;
mod extractor;
mod handlers;
mod parsing;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Option<Vec<UserId>>,
    engine: Arc<engine::Engine>,
    oracle: extractor::OracleClient,
}

pub struct Bot {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    engine: Arc<engine::Engine>,
    oracle: extractor::OracleClient,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    /// Run the telegram bot.
    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        let parameters = ConfigParameters {
            allowed_users: self.allowed_users.clone(),
            engine: self.engine.clone(),
            oracle: self.oracle.clone(),
        };

        Dispatcher::builder(bot, handlers::schema())
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default, Debug)]
pub struct BotBuilder {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    engine: Option<Arc<engine::Engine>>,
    oracle: Option<extractor::OracleClient>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn allowed_users(mut self, allowed_users: Vec<u64>) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users.into_iter().map(UserId).collect());
        }
        self
    }

    pub fn engine(mut self, engine: Arc<engine::Engine>) -> BotBuilder {
        self.engine = Some(engine);
        self
    }

    pub fn oracle(mut self, oracle: OracleClient) -> BotBuilder {
        self.oracle = Some(oracle);
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        let engine = self.engine.ok_or_else(|| "missing engine handle".to_string())?;
        let oracle = self.oracle.ok_or_else(|| "missing oracle client".to_string())?;

        Ok(Bot {
            token: self.token,
            allowed_users: self.allowed_users,
            engine,
            oracle,
        })
    }
}
