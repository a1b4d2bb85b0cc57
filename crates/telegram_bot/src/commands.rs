//! Command structs

use teloxide::utils::command::BotCommands;

/// Onboarding commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Comandos generales:")]
pub enum StartCommands {
    #[command(description = "introducción rápida.")]
    Start,
    #[command(description = "muestra esta ayuda.")]
    Help,
}

/// Commands that operate on stored expenses.
#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "Comandos para gestionar los gastos:"
)]
pub enum ExpenseCommands {
    #[command(description = "elimina el gasto del mensaje citado.")]
    Delete,
}

/// Commands for exporting user data.
#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "Comandos para exportar los datos:"
)]
pub enum ExportCommands {
    #[command(description = "descarga tus gastos en un archivo CSV.")]
    Report,
}
