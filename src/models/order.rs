use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle status. Delete is a status flip to `deleted`, never a
/// physical row removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Placed,
    Approved,
    Delivered,
    Deleted,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub id: i64,
    pub pet_id: i64,
    pub quantity: i64,
    pub ship_date: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_round_trips_wire_format() {
        let order: Order = serde_json::from_str(
            r#"{"petId":1,"quantity":10,"shipDate":"2022-01-01T06:29:51.438Z","status":"placed","complete":true}"#,
        )
        .unwrap();
        assert_eq!(order.pet_id, 1);
        assert_eq!(order.status, OrderStatus::Placed);
        assert!(order.ship_date.is_some());

        let v = serde_json::to_value(&order).unwrap();
        assert_eq!(v["petId"], 1);
        assert_eq!(v["status"], "placed");
    }
}
