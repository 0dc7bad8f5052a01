pub mod order;
pub mod pet;
pub mod user;

pub use order::{Order, OrderStatus};
pub use pet::{Category, Pet, PetStatus, Tag};
pub use user::{User, USER_STATUS_DELETED};
