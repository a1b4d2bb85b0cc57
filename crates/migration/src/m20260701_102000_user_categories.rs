use sea_orm_migration::prelude::*;

use crate::m20260701_100000_users::Users;
use crate::m20260701_101000_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum UserCategories {
    Table,
    UserId,
    CategoryName,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCategories::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserCategories::CategoryName)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserCategories::UserId)
                            .col(UserCategories::CategoryName),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_categories-user_id")
                            .from(UserCategories::Table, UserCategories::UserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_categories-category_name")
                            .from(UserCategories::Table, UserCategories::CategoryName)
                            .to(Categories::Table, Categories::Name),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCategories::Table).to_owned())
            .await
    }
}
