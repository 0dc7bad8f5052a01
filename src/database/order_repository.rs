use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::models::{Order, OrderStatus, PetStatus};

/// Store order persistence plus the pet inventory rollup.
#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Pet counts per sellable status. Statuses with no pets still appear
    /// with a zero count.
    pub async fn inventory(&self) -> Result<BTreeMap<String, i64>, sqlx::Error> {
        let counted: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(id) FROM pets \
             WHERE status IN ('available', 'pending', 'sold') GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut inventory: BTreeMap<String, i64> =
            [PetStatus::Available, PetStatus::Pending, PetStatus::Sold]
                .iter()
                .map(|status| (status.as_str().to_string(), 0))
                .collect();
        for (status, count) in counted {
            inventory.insert(status, count);
        }

        Ok(inventory)
    }

    pub async fn place(&self, mut order: Order) -> Result<Order, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO orders (pet_id, quantity, ship_date, status, complete) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(order.pet_id)
        .bind(order.quantity)
        .bind(order.ship_date)
        .bind(order.status)
        .bind(order.complete)
        .execute(&self.pool)
        .await?;

        order.id = result.last_insert_rowid();
        Ok(order)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, pet_id, quantity, ship_date, status, complete FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Soft delete: flip the status, keep the row.
    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(OrderStatus::Deleted)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
