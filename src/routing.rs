//! Application router configuration for the JSON API and the web pages.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};

use crate::{
    AppState,
    category::{
        create_category_api, create_category_endpoint, delete_category_api,
        delete_category_endpoint, get_categories_page, get_category_api, get_edit_category_page,
        get_new_category_page, list_categories_api, update_category_api, update_category_endpoint,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_api, create_transaction_endpoint, delete_transaction_api,
        delete_transaction_endpoint, get_edit_transaction_page, get_new_transaction_page,
        get_transaction_api, get_transactions_page, list_transactions_api, update_transaction_api,
        update_transaction_endpoint,
    },
    user::{
        create_user_api, create_user_endpoint, delete_user_api, delete_user_endpoint,
        get_edit_user_page, get_new_user_page, get_user_api, get_users_page, list_users_api,
        update_user_api, update_user_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            endpoints::USERS_API,
            get(list_users_api).post(create_user_api),
        )
        .route(
            endpoints::USER_API,
            get(get_user_api)
                .put(update_user_api)
                .delete(delete_user_api),
        )
        .route(
            endpoints::CATEGORIES_API,
            get(list_categories_api).post(create_category_api),
        )
        .route(
            endpoints::CATEGORY_API,
            get(get_category_api)
                .put(update_category_api)
                .delete(delete_category_api),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_api).post(create_transaction_api),
        )
        .route(
            endpoints::TRANSACTION_API,
            get(get_transaction_api)
                .put(update_transaction_api)
                .delete(delete_transaction_api),
        );

    let web_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::USERS_VIEW,
            get(get_users_page).post(create_user_endpoint),
        )
        .route(endpoints::NEW_USER_VIEW, get(get_new_user_page))
        .route(endpoints::EDIT_USER_VIEW, get(get_edit_user_page))
        .route(
            endpoints::USER_VIEW,
            put(update_user_endpoint).delete(delete_user_endpoint),
        )
        .route(
            endpoints::CATEGORIES_VIEW,
            get(get_categories_page).post(create_category_endpoint),
        )
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(
            endpoints::CATEGORY_VIEW,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_VIEW,
            get(get_transactions_page).post(create_transaction_endpoint),
        )
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(
            endpoints::TRANSACTION_VIEW,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        );

    api_routes
        .merge(web_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}
