pub use sea_orm_migration::prelude::*;

mod m20260701_100000_users;
mod m20260701_101000_categories;
mod m20260701_102000_user_categories;
mod m20260701_103000_expenses;
mod m20260701_104000_seed_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260701_100000_users::Migration),
            Box::new(m20260701_101000_categories::Migration),
            Box::new(m20260701_102000_user_categories::Migration),
            Box::new(m20260701_103000_expenses::Migration),
            Box::new(m20260701_104000_seed_categories::Migration),
        ]
    }
}
