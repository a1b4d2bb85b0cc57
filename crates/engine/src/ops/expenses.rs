use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, Expense, NewExpense, ResultEngine, categories, expenses, user_categories,
};

use super::{Engine, with_tx};

impl Engine {
    /// Validate and insert a single expense row.
    ///
    /// The category must exist in the catalog and be linked to the filing
    /// user; on any validation failure nothing is written.
    pub async fn add_expense(&self, expense: NewExpense) -> ResultEngine<Expense> {
        validate_value(&expense)?;
        ensure_linked_category(&self.database, expense.user_id, &expense.category).await?;

        let model = expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }

    /// Replace whatever is stored for `(user_id, message_id)` with `expense`.
    ///
    /// Delete and insert run in one transaction, so an edit either fully
    /// lands or leaves the previous row untouched. Returns the stored row
    /// and whether a previous row existed.
    pub async fn replace_expense(&self, expense: NewExpense) -> ResultEngine<(Expense, bool)> {
        validate_value(&expense)?;

        with_tx!(self, |db_tx| {
            ensure_linked_category(&db_tx, expense.user_id, &expense.category).await?;

            let deleted = expenses::Entity::delete_many()
                .filter(expenses::Column::UserId.eq(expense.user_id))
                .filter(expenses::Column::MessageId.eq(expense.message_id))
                .exec(&db_tx)
                .await?;

            let model = expenses::ActiveModel::from(&expense).insert(&db_tx).await?;
            Ok((Expense::from(model), deleted.rows_affected > 0))
        })
    }

    /// Delete any expense stored for `(user_id, message_id)`.
    ///
    /// Returns whether a row existed; a miss is not an error.
    pub async fn remove_by_message_id(&self, user_id: i64, message_id: i64) -> ResultEngine<bool> {
        let result = expenses::Entity::delete_many()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::MessageId.eq(message_id))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// All expenses for a user, newest insertion first.
    pub async fn user_expenses(&self, user_id: i64) -> ResultEngine<Vec<Expense>> {
        let rows = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_desc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }
}

fn validate_value(expense: &NewExpense) -> ResultEngine<()> {
    if !expense.value.is_finite() || expense.value < 0.0 {
        return Err(EngineError::InvalidAmount(
            "value must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

/// Check the category exists in the catalog and is linked to the user.
async fn ensure_linked_category<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    category: &str,
) -> ResultEngine<()> {
    let linked = user_categories::Entity::find_by_id((user_id, category.to_string()))
        .one(conn)
        .await?
        .is_some();
    if linked {
        return Ok(());
    }

    let known = categories::Entity::find_by_id(category.to_string())
        .one(conn)
        .await?
        .is_some();
    if known {
        Err(EngineError::CategoryNotLinked(category.to_string()))
    } else {
        Err(EngineError::UnknownCategory(category.to_string()))
    }
}
