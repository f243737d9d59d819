/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認可は route_layer ではなく handler 引数の AuthCtx<R> で route ごとに宣言
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    articles::{create_article, delete_article, get_article, list_articles, update_article},
    auth::{login, me, register},
    categories::{
        create_category, delete_category, get_category, list_categories, update_category,
    },
    health::health,
    products::{create_product, delete_product, get_product, list_products, update_product},
    subsectors::{
        create_subsector, delete_subsector, get_subsector, list_subsectors, update_subsector,
    },
    users::{create_user, delete_user, get_user, list_users, update_user},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/business-categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/business-categories/{category_id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/subsectors", get(list_subsectors).post(create_subsector))
        .route(
            "/subsectors/{subsector_id}",
            get(get_subsector)
                .put(update_subsector)
                .delete(delete_subsector),
        )
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{product_id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/{article_id}",
            get(get_article).put(update_article).delete(delete_article),
        )
}
