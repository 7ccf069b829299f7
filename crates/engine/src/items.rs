//! Catalog administration.

use spasibka_core::types::DbId;
use spasibka_db::models::item::{CreateItem, Item, UpdateItem};
use spasibka_db::repositories::{BuyTransactionRepo, ItemRepo};
use validator::Validate;

use crate::{Engine, EngineError};

impl Engine {
    /// Items that are active and in stock.
    pub async fn list_available_items(&self) -> Result<Vec<Item>, EngineError> {
        Ok(ItemRepo::list_available(&self.pool).await?)
    }

    pub async fn list_all_items(&self) -> Result<Vec<Item>, EngineError> {
        Ok(ItemRepo::list_all(&self.pool).await?)
    }

    pub async fn create_item(&self, input: &CreateItem) -> Result<Item, EngineError> {
        input.validate()?;
        let item = ItemRepo::create(&self.pool, input).await?;
        tracing::info!(item_id = item.id, "Item created");
        Ok(item)
    }

    pub async fn update_item(&self, id: DbId, patch: &UpdateItem) -> Result<Item, EngineError> {
        patch.validate()?;
        ItemRepo::update(&self.pool, id, patch)
            .await?
            .ok_or_else(|| EngineError::not_found("item", id))
    }

    /// Delete an item nobody has bought yet.
    pub async fn delete_item(&self, id: DbId) -> Result<(), EngineError> {
        let mut tx = self.pool.begin().await?;
        if ItemRepo::lock_by_id(&mut tx, id).await?.is_none() {
            return Err(EngineError::not_found("item", id));
        }
        if BuyTransactionRepo::exists_for_item(&mut *tx, id).await? {
            return Err(EngineError::conflict(
                "Cannot delete an item that has already been purchased",
            ));
        }
        ItemRepo::delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(item_id = id, "Item deleted");
        Ok(())
    }
}
