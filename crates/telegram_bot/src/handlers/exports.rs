//! Handler for commands that export data

use chrono::{DateTime, Utc};
use csv::Writer;
use engine::Expense;
use serde::Serialize;
use teloxide::{
    RequestError,
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
    types::InputFile,
};

use crate::{ConfigParameters, commands::ExportCommands, ui};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the schema for `ExportCommands` commands
pub fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .filter_command::<ExportCommands>()
        .endpoint(handle_exports)
}

async fn handle_exports(
    bot: Bot,
    cfg: ConfigParameters,
    msg: Message,
    cmd: ExportCommands,
) -> ResponseResult<()> {
    let ExportCommands::Report = cmd;

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

    let rows = match cfg.engine.user_expenses(user_id).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!("failed to load expenses for {user_id}: {err}");
            bot.send_message(msg.chat.id, ui::STORAGE_ERROR).await?;
            return Ok(());
        }
    };

    if rows.is_empty() {
        bot.send_message(msg.chat.id, ui::NO_EXPENSES).await?;
        return Ok(());
    }

    let data = match rows_to_csv(&rows) {
        Ok(data) => data,
        Err(err) => {
            tracing::error!("failed to serialize export: {err}");
            bot.send_message(msg.chat.id, ui::EXPORT_ERROR).await?;
            return Ok(());
        }
    };

    bot.send_document(
        msg.chat.id,
        InputFile::memory(data).file_name(report_file_name(Utc::now())),
    )
    .caption(ui::REPORT_CAPTION)
    .await?;

    Ok(())
}

#[derive(Serialize)]
struct ExportRow<'a> {
    date: String,
    value: f64,
    category: &'a str,
    currency: &'a str,
    text: &'a str,
}

/// Serialize ledger rows to UTF-8 CSV bytes, header
/// `date,value,category,currency,text`, in the given order.
fn rows_to_csv(rows: &[Expense]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = Writer::from_writer(vec![]);
    for expense in rows {
        writer.serialize(ExportRow {
            date: expense.date.format(DATE_FORMAT).to_string(),
            value: expense.value,
            category: &expense.category,
            currency: &expense.currency,
            text: &expense.text,
        })?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

/// File name labeling the export with the current UTC calendar date.
fn report_file_name(now: DateTime<Utc>) -> String {
    format!("expenses_{}.csv", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn expense(id: i64, date: DateTime<Utc>, value: f64, category: &str, text: &str) -> Expense {
        Expense {
            id,
            message_id: id + 100,
            chat_id: 7,
            user_id: 1,
            date,
            value,
            category: category.to_string(),
            currency: "ARS".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn csv_round_trip_preserves_rows_and_order() {
        let newest = Utc.with_ymd_and_hms(2026, 7, 2, 18, 30, 0).unwrap();
        let oldest = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
        let rows = vec![
            expense(2, newest, 45.2, "SUPERMERCADO", "super"),
            expense(1, oldest, 15.5, "SALIR A COMER", "almuerzo"),
        ];

        let bytes = rows_to_csv(&rows).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());

        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec!["date", "value", "category", "currency", "text"])
        );

        let records: Vec<csv::StringRecord> =
            reader.records().map(|record| record.unwrap()).collect();
        assert_eq!(records.len(), 2);

        for (record, row) in records.iter().zip(&rows) {
            assert_eq!(&record[0], row.date.format(DATE_FORMAT).to_string());
            assert_eq!(record[1].parse::<f64>().unwrap(), row.value);
            assert_eq!(&record[2], row.category);
            assert_eq!(&record[3], row.currency);
            assert_eq!(&record[4], row.text);
        }
    }

    #[test]
    fn report_file_name_embeds_utc_date() {
        let now = Utc.with_ymd_and_hms(2026, 7, 2, 23, 59, 59).unwrap();
        assert_eq!(report_file_name(now), "expenses_2026-07-02.csv");
    }
}
