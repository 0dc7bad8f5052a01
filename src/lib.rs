//! Petstore REST service: pets, store orders and users over SQLite, with a
//! JWT gate on the pet and inventory routes.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use auth::TokenAuthority;
use database::{OrderRepository, PetRepository, UserRepository};
use services::{PetService, StoreService, UserService};

/// Shared handler state: one service per resource plus the token authority
/// the auth gate verifies against.
#[derive(Clone)]
pub struct AppState {
    pub pets: PetService,
    pub store: StoreService,
    pub users: UserService,
    pub tokens: Arc<dyn TokenAuthority>,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: Arc<dyn TokenAuthority>) -> Self {
        Self {
            pets: PetService::new(PetRepository::new(pool.clone())),
            store: StoreService::new(OrderRepository::new(pool.clone())),
            users: UserService::new(UserRepository::new(pool), tokens.clone()),
            tokens,
        }
    }
}

/// Build the full /v2 router. Pet routes and the inventory route sit behind
/// the token gate; order and user routes are open.
pub fn app(state: AppState) -> Router {
    let pet_routes = Router::new()
        .route(
            "/",
            post(handlers::pet::add_pet).put(handlers::pet::update_pet),
        )
        .route("/findByStatus", get(handlers::pet::find_by_status))
        .route("/findByTags", get(handlers::pet::find_by_tags))
        .route(
            "/:pet_id",
            get(handlers::pet::get_by_id)
                .post(handlers::pet::update_with_form)
                .delete(handlers::pet::delete_pet),
        )
        .route("/:pet_id/uploadImage", post(handlers::pet::upload_image))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let store_routes = Router::new()
        .route(
            "/inventory",
            get(handlers::store::inventory).route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::auth::require_auth,
            )),
        )
        .route("/order", post(handlers::store::place_order))
        .route(
            "/order/:order_id",
            get(handlers::store::get_order_by_id).delete(handlers::store::delete_order),
        );

    let user_routes = Router::new()
        .route("/", post(handlers::user::create_user))
        .route("/createWithArray", post(handlers::user::create_with_array))
        .route("/createWithList", post(handlers::user::create_with_list))
        .route("/login", get(handlers::user::login))
        .route("/logout", get(handlers::user::logout))
        .route(
            "/:username",
            get(handlers::user::get_by_name)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        );

    Router::new()
        .nest("/v2/pet", pet_routes)
        .nest("/v2/store", store_routes)
        .nest("/v2/user", user_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
