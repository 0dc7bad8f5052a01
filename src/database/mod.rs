//! Store bootstrap and the per-resource repositories.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub mod order_repository;
pub mod pet_repository;
pub mod pet_rows;
pub mod user_repository;

pub use order_repository::OrderRepository;
pub use pet_repository::PetRepository;
pub use user_repository::UserRepository;

/// Open the SQLite pool, creating the database file if it does not exist.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!("database pool ready: {database_url}");
    Ok(pool)
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS pets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category_id INTEGER,
        status TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS pet_photos (
        pet_id INTEGER NOT NULL,
        photo_url TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS tag_pets (
        pet_id INTEGER NOT NULL,
        tag_id INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pet_id INTEGER,
        quantity INTEGER,
        ship_date TEXT,
        status TEXT NOT NULL,
        complete BOOLEAN
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        first_name TEXT,
        last_name TEXT,
        email TEXT,
        password TEXT,
        phone TEXT,
        user_status INTEGER
    )",
];

/// Create the schema. Idempotent; a failure here is fatal at startup.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("database schema migrated");
    Ok(())
}
