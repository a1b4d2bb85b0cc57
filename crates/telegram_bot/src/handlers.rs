//! Update handlers, one module per concern.

use teloxide::{RequestError, dispatching::UpdateHandler, prelude::*, types::User};

use crate::{ConfigParameters, ui};

mod expense;
mod exports;
mod start;

/// Build the full update schema for the dispatcher.
///
/// Command branches come first; the trailing branch of [`expense::schema`]
/// treats any remaining text message as an expense to record.
pub(crate) fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(start::schema())
        .branch(exports::schema())
        .branch(expense::schema())
}

fn is_allowed(cfg: &ConfigParameters, from: Option<&User>) -> bool {
    let Some(from) = from else {
        return false;
    };
    match &cfg.allowed_users {
        None => true,
        Some(ids) => ids.contains(&from.id),
    }
}

/// Register the user on first interaction.
///
/// Returns false (after telling the user) when storage failed; the caller
/// should stop handling the update in that case.
async fn ensure_registered(
    bot: &Bot,
    msg: &Message,
    cfg: &ConfigParameters,
    user_id: i64,
) -> ResponseResult<bool> {
    match cfg.engine.is_registered(user_id).await {
        Ok(true) => return Ok(true),
        Ok(false) => {}
        Err(err) => {
            tracing::error!("failed to check registration for {user_id}: {err}");
            bot.send_message(msg.chat.id, ui::STORAGE_ERROR).await?;
            return Ok(false);
        }
    }

    if let Err(err) = cfg.engine.register_user(user_id).await {
        tracing::error!("failed to register user {user_id}: {err}");
        bot.send_message(msg.chat.id, ui::STORAGE_ERROR).await?;
        return Ok(false);
    }

    tracing::info!("registered new user {user_id}");
    Ok(true)
}
