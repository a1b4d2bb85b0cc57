//! Expense primitives.
//!
//! An `Expense` is one stored ledger row derived from a single chat message.
//! Rows are never mutated in place: an edit replaces the row keyed by
//! `(user_id, message_id)` with a freshly interpreted one.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

/// A ledger row as stored, including its surrogate insertion-ordered id.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub message_id: i64,
    pub chat_id: i64,
    pub user_id: i64,
    pub date: DateTime<Utc>,
    pub value: f64,
    pub category: String,
    pub currency: String,
    pub text: String,
}

/// A fully interpreted expense that has not been stored yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpense {
    pub message_id: i64,
    pub chat_id: i64,
    pub user_id: i64,
    pub date: DateTime<Utc>,
    pub value: f64,
    pub category: String,
    pub currency: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub message_id: i64,
    pub chat_id: i64,
    pub user_id: i64,
    pub date: DateTimeUtc,
    pub value: f64,
    pub category: String,
    pub currency: String,
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::Category",
        to = "super::categories::Column::Name",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Categories,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewExpense> for ActiveModel {
    fn from(expense: &NewExpense) -> Self {
        Self {
            id: ActiveValue::NotSet,
            message_id: ActiveValue::Set(expense.message_id),
            chat_id: ActiveValue::Set(expense.chat_id),
            user_id: ActiveValue::Set(expense.user_id),
            date: ActiveValue::Set(expense.date),
            value: ActiveValue::Set(expense.value),
            category: ActiveValue::Set(expense.category.clone()),
            currency: ActiveValue::Set(expense.currency.clone()),
            text: ActiveValue::Set(expense.text.clone()),
        }
    }
}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            message_id: model.message_id,
            chat_id: model.chat_id,
            user_id: model.user_id,
            date: model.date,
            value: model.value,
            category: model.category,
            currency: model.currency,
            text: model.text,
        }
    }
}
