use sea_orm_migration::prelude::*;

use crate::m20260701_100000_users::Users;
use crate::m20260701_101000_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    MessageId,
    ChatId,
    UserId,
    Date,
    Value,
    Category,
    Currency,
    Text,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::MessageId).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::ChatId).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::Date).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::Value).double().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Currency).string().not_null())
                    .col(ColumnDef::new(Expenses::Text).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-user_id")
                            .from(Expenses::Table, Expenses::UserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-category")
                            .from(Expenses::Table, Expenses::Category)
                            .to(Categories::Table, Categories::Name),
                    )
                    .to_owned(),
            )
            .await?;

        // One active expense per source message; edits replace inside a
        // transaction, so the index never blocks a legitimate edit.
        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-user_id-message_id-unique")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::MessageId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await
    }
}
