use std::collections::BTreeMap;

use thiserror::Error;

use crate::database::OrderRepository;
use crate::models::{Order, OrderStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("order not found")]
    NotFound,
    #[error("order already deleted")]
    AlreadyDeleted,
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Store order operations. Delete is idempotent in its final state but not in
/// its call outcome: the second delete of an order is a user error.
#[derive(Clone)]
pub struct StoreService {
    repository: OrderRepository,
}

impl StoreService {
    pub fn new(repository: OrderRepository) -> Self {
        Self { repository }
    }

    pub async fn inventory(&self) -> Result<BTreeMap<String, i64>, StoreError> {
        Ok(self.repository.inventory().await?)
    }

    pub async fn place_order(&self, order: Order) -> Result<Order, StoreError> {
        Ok(self.repository.place(order).await?)
    }

    pub async fn get_order_by_id(&self, id: i64) -> Result<Order, StoreError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn delete_order(&self, id: i64) -> Result<(), StoreError> {
        let order = self.get_order_by_id(id).await?;

        if order.status == OrderStatus::Deleted {
            return Err(StoreError::AlreadyDeleted);
        }

        Ok(self.repository.delete(id).await?)
    }
}
