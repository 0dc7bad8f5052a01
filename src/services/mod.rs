pub mod pet;
pub mod store;
pub mod user;

pub use pet::PetService;
pub use store::StoreService;
pub use user::UserService;
