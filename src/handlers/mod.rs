pub mod pet;
pub mod store;
pub mod user;
