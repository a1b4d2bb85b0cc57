//! Handlers for onboarding commands.

use teloxide::{
    RequestError,
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
    types::ParseMode,
};

use crate::{ConfigParameters, commands::StartCommands, ui};

/// Build the schema for `StartCommands` commands
pub fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .filter_command::<StartCommands>()
        .endpoint(handle_start_commands)
}

async fn handle_start_commands(
    bot: Bot,
    cfg: ConfigParameters,
    msg: Message,
    cmd: StartCommands,
) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    if !super::is_allowed(&cfg, Some(user)) {
        bot.send_message(msg.chat.id, ui::ACCESS_DENIED).await?;
        return Ok(());
    }
    let user_id = user.id.0 as i64;

    match cmd {
        StartCommands::Start => {
            if !super::ensure_registered(&bot, &msg, &cfg, user_id).await? {
                return Ok(());
            }
            bot.send_message(msg.chat.id, ui::START_MESSAGE)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        StartCommands::Help => {
            bot.send_message(msg.chat.id, ui::HELP_MESSAGE)
                .parse_mode(ParseMode::Html)
                .await?;
        }
    }

    Ok(())
}
