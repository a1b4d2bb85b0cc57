use sea_orm::{ConnectionTrait, Statement};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Base catalog linked to every user at registration time.
const BASE_CATEGORIES: &[&str] = &[
    // Finanzas
    "TARJETA DE CRÉDITO",
    "INVERSIONES",
    // Comida
    "SUPERMERCADO",
    "SALIR A COMER",
    "COMIDA A DOMICILIO",
    // Vivienda / Hogar
    "LIMPIEZA",
    "MANTENIMIENTO HOGAR",
    "EXPENSAS",
    // Transporte
    "TRANSPORTE PÚBLICO",
    "TAXI",
    // Servicios básicos
    "ELECTRICIDAD",
    "GAS",
    "AGUA",
    "INTERNET",
    "TELÉFONO",
    "INMOBILIARIO",
    "MUNICIPAL",
    // Suscripciones / Tecnología
    "SPOTIFY",
    "CHATBOT",
    "TECNOLOGÍA",
    // Educación / Salud / Bienestar
    "EDUCACIÓN",
    "GIMNASIO",
    "ROPA",
    "SALUD",
    // Ocio / Sociales
    "SALIDAS SOCIALES",
    "VIAJES",
    "REGALOS",
    // Misceláneo
    "TEST",
    "OTROS",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = db.get_database_backend();

        // Insert-if-absent so re-seeding an existing catalog stays a no-op.
        for name in BASE_CATEGORIES {
            let existing = db
                .query_one(Statement::from_sql_and_values(
                    backend,
                    "SELECT name FROM categories WHERE name = ?;",
                    vec![(*name).into()],
                ))
                .await?;
            if existing.is_some() {
                continue;
            }

            db.execute(Statement::from_sql_and_values(
                backend,
                "INSERT INTO categories (name) VALUES (?);",
                vec![(*name).into()],
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = db.get_database_backend();

        for name in BASE_CATEGORIES {
            db.execute(Statement::from_sql_and_values(
                backend,
                "DELETE FROM categories WHERE name = ?;",
                vec![(*name).into()],
            ))
            .await?;
        }

        Ok(())
    }
}
