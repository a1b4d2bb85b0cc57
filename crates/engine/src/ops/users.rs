use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, categories, user_categories, users};

use super::{Engine, with_tx};

impl Engine {
    /// Whether a user row already exists for `user_id`.
    pub async fn is_registered(&self, user_id: i64) -> ResultEngine<bool> {
        Ok(users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .is_some())
    }

    /// Create the user and link every category currently in the catalog.
    ///
    /// Catalog names added after registration are not linked retroactively.
    /// Callers are expected to check [`Engine::is_registered`] first; a
    /// duplicate registration fails with [`EngineError::ExistingKey`].
    pub async fn register_user(&self, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            if users::Entity::find_by_id(user_id)
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(user_id.to_string()));
            }

            let user = users::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                registered_at: ActiveValue::Set(Utc::now()),
            };
            user.insert(&db_tx).await?;

            let catalog = categories::Entity::find().all(&db_tx).await?;
            for category in catalog {
                let link = user_categories::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    category_name: ActiveValue::Set(category.name),
                };
                link.insert(&db_tx).await?;
            }

            Ok(())
        })
    }
}
