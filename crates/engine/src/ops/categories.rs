use sea_orm::{ActiveValue, DbErr, QueryFilter, QueryOrder, prelude::*, sea_query::OnConflict};

use crate::{ResultEngine, categories, user_categories};

use super::Engine;

impl Engine {
    /// Insert `name` into the global catalog if absent.
    ///
    /// Returns whether the name was newly created. The catalog is shared
    /// process-wide state, so the insert must stay idempotent under
    /// concurrent calls. Existing users keep their current links either way.
    pub async fn add_global_category(&self, name: &str) -> ResultEngine<bool> {
        let active = categories::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
        };
        match categories::Entity::insert(active)
            .on_conflict(
                OnConflict::column(categories::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.database)
            .await
        {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Link an existing catalog name to a user.
    ///
    /// Returns false when the name is not in the catalog or the link is
    /// already present.
    pub async fn link_user_category(&self, user_id: i64, name: &str) -> ResultEngine<bool> {
        if categories::Entity::find_by_id(name.to_string())
            .one(&self.database)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        let active = user_categories::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            category_name: ActiveValue::Set(name.to_string()),
        };
        match user_categories::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([
                    user_categories::Column::UserId,
                    user_categories::Column::CategoryName,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(&self.database)
            .await
        {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Remove a user-category link. Returns whether a link existed.
    pub async fn unlink_user_category(&self, user_id: i64, name: &str) -> ResultEngine<bool> {
        let result = user_categories::Entity::delete_many()
            .filter(user_categories::Column::UserId.eq(user_id))
            .filter(user_categories::Column::CategoryName.eq(name))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// The user's linked category names, sorted by name.
    pub async fn user_categories(&self, user_id: i64) -> ResultEngine<Vec<String>> {
        let links = user_categories::Entity::find()
            .filter(user_categories::Column::UserId.eq(user_id))
            .order_by_asc(user_categories::Column::CategoryName)
            .all(&self.database)
            .await?;
        Ok(links.into_iter().map(|link| link.category_name).collect())
    }
}
