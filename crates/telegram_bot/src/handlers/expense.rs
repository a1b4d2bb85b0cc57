//! Handlers for recording, editing and deleting expenses.
//!
//! A plain text message runs through the interpretation pipeline (splitter,
//! then the constrained extractor) and lands in the ledger. An edited
//! message re-runs the pipeline and replaces whatever the original message
//! produced: latest edit wins, and editing a message that never produced a
//! record still creates one.

use chrono::Utc;
use engine::{EngineError, NewExpense};
use teloxide::{
    RequestError,
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
};

use crate::{
    ConfigParameters,
    commands::ExpenseCommands,
    extractor::ExpenseExtraction,
    parsing::split_expense,
    ui,
};

/// Build the schema for expense messages and `ExpenseCommands` commands
pub fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<ExpenseCommands>()
                .endpoint(handle_expense_commands),
        )
        .branch(Update::filter_edited_message().endpoint(handle_edited_message))
        .branch(Update::filter_message().endpoint(handle_message))
}

async fn handle_message(bot: Bot, cfg: ConfigParameters, msg: Message) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    // Unknown commands are not expenses; leave them to the default handler.
    if text.trim_start().starts_with('/') {
        return Ok(());
    }

    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    if !super::is_allowed(&cfg, Some(user)) {
        bot.send_message(msg.chat.id, ui::ACCESS_DENIED).await?;
        return Ok(());
    }
    let user_id = user.id.0 as i64;
    if !super::ensure_registered(&bot, &msg, &cfg, user_id).await? {
        return Ok(());
    }

    let Some((value, label)) = split_expense(text) else {
        bot.send_message(msg.chat.id, ui::FORMAT_ERROR).await?;
        return Ok(());
    };

    let Some(extraction) = classify(&bot, &msg, &cfg, user_id, &label).await? else {
        return Ok(());
    };

    let expense = NewExpense {
        message_id: i64::from(msg.id.0),
        chat_id: msg.chat.id.0,
        user_id,
        date: Utc::now(),
        value,
        category: extraction.category,
        currency: extraction.currency,
        text: label,
    };

    match cfg.engine.add_expense(expense).await {
        Ok(stored) => {
            bot.send_message(msg.chat.id, ui::expense_recorded(stored.value, &stored.category))
                .await?;
        }
        Err(err @ (EngineError::UnknownCategory(_) | EngineError::CategoryNotLinked(_))) => {
            tracing::warn!("rejected expense from {user_id}: {err}");
            bot.send_message(msg.chat.id, ui::CATEGORY_ERROR).await?;
        }
        Err(err) => {
            tracing::error!("failed to store expense from {user_id}: {err}");
            bot.send_message(msg.chat.id, ui::STORAGE_ERROR).await?;
        }
    }

    Ok(())
}

/// Reconcile an edited message with the ledger: re-interpret the new text
/// and atomically replace the row keyed by this message identity.
async fn handle_edited_message(
    bot: Bot,
    cfg: ConfigParameters,
    msg: Message,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if text.trim_start().starts_with('/') {
        return Ok(());
    }

    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    if !super::is_allowed(&cfg, Some(user)) {
        bot.send_message(msg.chat.id, ui::ACCESS_DENIED).await?;
        return Ok(());
    }
    let user_id = user.id.0 as i64;
    if !super::ensure_registered(&bot, &msg, &cfg, user_id).await? {
        return Ok(());
    }

    let Some((value, label)) = split_expense(text) else {
        bot.send_message(msg.chat.id, ui::FORMAT_ERROR).await?;
        return Ok(());
    };

    let Some(extraction) = classify(&bot, &msg, &cfg, user_id, &label).await? else {
        return Ok(());
    };

    let expense = NewExpense {
        message_id: i64::from(msg.id.0),
        chat_id: msg.chat.id.0,
        user_id,
        date: Utc::now(),
        value,
        category: extraction.category,
        currency: extraction.currency,
        text: label,
    };

    match cfg.engine.replace_expense(expense).await {
        Ok((stored, _replaced)) => {
            bot.send_message(msg.chat.id, ui::expense_updated(stored.value, &stored.category))
                .await?;
        }
        Err(err @ (EngineError::UnknownCategory(_) | EngineError::CategoryNotLinked(_))) => {
            tracing::warn!("rejected edited expense from {user_id}: {err}");
            bot.send_message(msg.chat.id, ui::CATEGORY_ERROR).await?;
        }
        Err(err) => {
            tracing::error!("failed to replace expense from {user_id}: {err}");
            bot.send_message(msg.chat.id, ui::STORAGE_ERROR).await?;
        }
    }

    Ok(())
}

async fn handle_expense_commands(
    bot: Bot,
    cfg: ConfigParameters,
    msg: Message,
    cmd: ExpenseCommands,
) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    if !super::is_allowed(&cfg, Some(user)) {
        bot.send_message(msg.chat.id, ui::ACCESS_DENIED).await?;
        return Ok(());
    }
    let user_id = user.id.0 as i64;
    if !super::ensure_registered(&bot, &msg, &cfg, user_id).await? {
        return Ok(());
    }

    match cmd {
        ExpenseCommands::Delete => {
            let Some(replied) = msg.reply_to_message() else {
                bot.send_message(msg.chat.id, ui::DELETE_USAGE).await?;
                return Ok(());
            };

            let removed = match cfg
                .engine
                .remove_by_message_id(user_id, i64::from(replied.id.0))
                .await
            {
                Ok(removed) => removed,
                Err(err) => {
                    tracing::error!("failed to delete expense for {user_id}: {err}");
                    bot.send_message(msg.chat.id, ui::STORAGE_ERROR).await?;
                    return Ok(());
                }
            };

            let reply = if removed { ui::DELETED } else { ui::NOTHING_TO_DELETE };
            bot.send_message(msg.chat.id, reply).await?;
        }
    }

    Ok(())
}

/// Run the extraction oracle constrained to the user's category set.
///
/// The set is loaded fresh for every call, so catalog links changed between
/// messages are picked up immediately.
async fn classify(
    bot: &Bot,
    msg: &Message,
    cfg: &ConfigParameters,
    user_id: i64,
    label: &str,
) -> ResponseResult<Option<ExpenseExtraction>> {
    let allowed = match cfg.engine.user_categories(user_id).await {
        Ok(list) => list,
        Err(err) => {
            tracing::error!("failed to load categories for {user_id}: {err}");
            bot.send_message(msg.chat.id, ui::STORAGE_ERROR).await?;
            return Ok(None);
        }
    };

    match cfg.oracle.extract(label, &allowed).await {
        Ok(extraction) => Ok(Some(extraction)),
        Err(err) => {
            tracing::error!("extraction failed for {user_id}: {err}");
            bot.send_message(msg.chat.id, ui::EXTRACTION_ERROR).await?;
            Ok(None)
        }
    }
}
