//! User-facing message strings.
//!
//! Kept in one place so the handlers stay focused on control flow.

pub(crate) const START_MESSAGE: &str = "<b>👋 Bienvenido</b>\n\n\
Enviá un mensaje con un gasto incluyendo monto y comentario.\n\
Si la moneda no es ARS podés aclararla.\n\n\
<b>Ejemplos:</b>\n\
<i>café en la facu 150</i>\n\
<i>20.5 USD regalo cumple</i>\n\
<i>netflix 799,99</i>\n\n\
<b>Tips rápidos:</b>\n\
• Editá tu mensaje para modificar un gasto ya cargado.\n\
• Respondé al mensaje del gasto con /delete para eliminarlo.\n\
• Usá /report para descargar tus gastos en CSV.\n\
• Usá /help para ver todos los comandos.";

pub(crate) const HELP_MESSAGE: &str = "📖 <b>Ayuda</b>\n\n\
<b>Comandos disponibles:</b>\n\
• /help — muestra esta ayuda\n\
• /start — introducción rápida\n\
• /report — descarga tus gastos en CSV\n\
• /delete — elimina un gasto\n\n\
<b>Cómo usar el bot:</b>\n\
• <b>Registrar un gasto:</b> simplemente escribí el texto del gasto.\n\
  Ejemplo:\n\
  <i>almuerzo en restaurante 2500</i>\n\
  (Se registra un gasto por mensaje. El bot detecta monto, moneda y categoría automáticamente.)\n\n\
• <b>Modificar un gasto:</b> editá el mensaje original del gasto.\n\
  El registro anterior se elimina y se vuelve a crear actualizado.\n\n\
• <b>Eliminar un gasto:</b> respondé al mensaje del gasto con /delete.\n\
  Debés citar el mensaje correcto que querés borrar.";

pub(crate) const ACCESS_DENIED: &str = "🚫 Access denied";

pub(crate) const FORMAT_ERROR: &str = "🚫 No se pudo interpretar el mensaje. Por favor, usá el \
formato: <monto> <comentario> o <comentario> <monto>.";

pub(crate) const EXTRACTION_ERROR: &str =
    "No pude clasificar el gasto. Probá de nuevo en un rato.";

pub(crate) const CATEGORY_ERROR: &str =
    "La categoría del gasto no está habilitada para tu usuario.";

pub(crate) const STORAGE_ERROR: &str =
    "Problemas con el almacenamiento. Intentá de nuevo más tarde.";

pub(crate) const DELETE_USAGE: &str =
    "Respondé al mensaje del gasto que querés borrar con /delete.";

pub(crate) const DELETED: &str = "🗑 Gasto eliminado.";

pub(crate) const NOTHING_TO_DELETE: &str =
    "No había ningún gasto registrado para ese mensaje.";

pub(crate) const NO_EXPENSES: &str = "Todavía no tenés gastos registrados.";

pub(crate) const EXPORT_ERROR: &str = "Hubo un error al generar el CSV.";

pub(crate) const REPORT_CAPTION: &str = "Here’s your CSV 👇";

pub(crate) fn expense_recorded(value: f64, category: &str) -> String {
    format!("✅ Gasto de {value} registrado en categoría \"{category}\".")
}

pub(crate) fn expense_updated(value: f64, category: &str) -> String {
    format!("✏️ Gasto actualizado: {value} en categoría \"{category}\".")
}
