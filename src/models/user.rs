use serde::{Deserialize, Serialize};

/// Account marked as deleted keeps its row with this status value so the
/// username stays reserved.
pub const USER_STATUS_DELETED: i64 = -1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub user_status: i64,
}

impl User {
    pub fn is_deleted(&self) -> bool {
        self.user_status == USER_STATUS_DELETED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_uses_camel_case_wire_names() {
        let user = User {
            id: 1,
            username: "admin".into(),
            first_name: "John".into(),
            last_name: "Wick".into(),
            email: "wick@continental.com".into(),
            password: "admin".into(),
            phone: "8-999-666-99-66".into(),
            user_status: 1,
        };

        let v = serde_json::to_value(&user).unwrap();
        assert_eq!(v["username"], "admin");
        assert_eq!(v["firstName"], "John");
        assert_eq!(v["userStatus"], 1);
    }

    #[test]
    fn deleted_marker() {
        let user = User { user_status: USER_STATUS_DELETED, ..User::default() };
        assert!(user.is_deleted());
    }
}
