//! JSON endpoints for transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    api_json::ApiJson,
    app_state::lock_connection,
    transaction::{
        NewTransaction, TransactionId,
        db::{get_all_transactions, get_transaction},
        dto::TransactionDto,
        service::{create_transaction, delete_transaction, update_transaction},
    },
};

/// The state needed by the transaction API.
#[derive(Debug, Clone)]
pub struct TransactionApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List every transaction.
pub async fn list_transactions_api(
    State(state): State<TransactionApiState>,
) -> Result<Json<Vec<TransactionDto>>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let transactions = get_all_transactions(&connection)?;

    Ok(Json(
        transactions.into_iter().map(TransactionDto::from).collect(),
    ))
}

/// Create a transaction and respond with 201 and the stored transaction.
pub async fn create_transaction_api(
    State(state): State<TransactionApiState>,
    ApiJson(dto): ApiJson<TransactionDto>,
) -> Result<(StatusCode, Json<TransactionDto>), Error> {
    let new_transaction = NewTransaction::try_from(dto)?;
    let connection = lock_connection(&state.db_connection)?;
    let transaction = create_transaction(&new_transaction, &connection)?;

    Ok((StatusCode::CREATED, Json(transaction.into())))
}

/// Get a single transaction.
pub async fn get_transaction_api(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionApiState>,
) -> Result<Json<TransactionDto>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_transaction(transaction_id, &connection).map(|transaction| Json(transaction.into()))
}

/// Replace a transaction.
pub async fn update_transaction_api(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionApiState>,
    ApiJson(dto): ApiJson<TransactionDto>,
) -> Result<Json<TransactionDto>, Error> {
    let new_transaction = NewTransaction::try_from(dto)?;
    let connection = lock_connection(&state.db_connection)?;

    update_transaction(transaction_id, &new_transaction, &connection)
        .map(|transaction| Json(transaction.into()))
}

/// Delete a transaction.
pub async fn delete_transaction_api(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionApiState>,
) -> Result<StatusCode, Error> {
    let connection = lock_connection(&state.db_connection)?;
    delete_transaction(transaction_id, &connection)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod transaction_api_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rust_decimal::Decimal;
    use serde_json::json;
    use tokio::task::JoinSet;

    use crate::{
        category::CategoryDto,
        endpoints::{self, format_endpoint},
        error::{ErrorCode, ErrorResponse},
        test_utils::get_test_server,
        transaction::dto::TransactionDto,
        user::UserDto,
    };

    async fn create_user(server: &TestServer, email: &str) -> i64 {
        server
            .post(endpoints::USERS_API)
            .json(&json!({ "fullName": "Someone", "email": email }))
            .await
            .json::<UserDto>()
            .id
            .expect("created user should have an ID")
    }

    async fn create_category(server: &TestServer) -> i64 {
        server
            .post(endpoints::CATEGORIES_API)
            .json(&json!({ "name": "Food" }))
            .await
            .json::<CategoryDto>()
            .id
            .expect("created category should have an ID")
    }

    async fn get_balance(server: &TestServer, user_id: i64) -> Option<Decimal> {
        server
            .get(&format_endpoint(endpoints::USER_API, user_id))
            .await
            .json::<UserDto>()
            .balance
    }

    #[tokio::test]
    async fn create_transaction_updates_balance() {
        let server = get_test_server();
        let user_id = create_user(&server, "ada@example.com").await;
        let category_id = create_category(&server).await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "userId": user_id,
                "categoryId": category_id,
                "type": "debit",
                "amount": 12.5,
                "time": "2024-01-15T10:00:00Z"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let transaction = response.json::<TransactionDto>();
        assert!(transaction.id.is_some());
        assert_eq!(transaction.transaction_type.as_deref(), Some("debit"));
        assert_eq!(get_balance(&server, user_id).await, Some(Decimal::new(-125, 1)));
    }

    #[tokio::test]
    async fn incorrect_type_is_unsupported() {
        let server = get_test_server();
        let user_id = create_user(&server, "ada@example.com").await;
        let category_id = create_category(&server).await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "userId": user_id,
                "categoryId": category_id,
                "type": "incorrect-transaction-type",
                "amount": 1
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<ErrorResponse>(),
            ErrorResponse {
                code: ErrorCode::UnsupportedTransactionType,
                message: "Received unsupported transaction type [incorrect-transaction-type]"
                    .to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn null_type_is_unsupported() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({ "userId": 1, "categoryId": 1, "type": null, "amount": 1 }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<ErrorResponse>(),
            ErrorResponse {
                code: ErrorCode::UnsupportedTransactionType,
                message: "Transaction type can not be null".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let server = get_test_server();
        let category_id = create_category(&server).await;

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "userId": 404,
                "categoryId": category_id,
                "type": "credit",
                "amount": 1
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<ErrorResponse>().message,
            "User with id='404' not found"
        );
    }

    #[tokio::test]
    async fn update_and_delete_keep_balance_in_step() {
        let server = get_test_server();
        let ada = create_user(&server, "ada@example.com").await;
        let bob = create_user(&server, "bob@example.com").await;
        let category_id = create_category(&server).await;
        let created = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "userId": ada,
                "categoryId": category_id,
                "type": "credit",
                "amount": 100
            }))
            .await
            .json::<TransactionDto>();
        let transaction_endpoint =
            format_endpoint(endpoints::TRANSACTION_API, created.id.unwrap());

        server
            .put(&transaction_endpoint)
            .json(&json!({
                "userId": bob,
                "categoryId": category_id,
                "type": "debit",
                "amount": 40
            }))
            .await
            .assert_status_ok();

        assert_eq!(get_balance(&server, ada).await, Some(Decimal::ZERO));
        assert_eq!(get_balance(&server, bob).await, Some(Decimal::from(-40)));

        server.delete(&transaction_endpoint).await.assert_status_ok();

        assert_eq!(get_balance(&server, bob).await, Some(Decimal::ZERO));
        assert_eq!(
            server.get(&transaction_endpoint).await.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn amount_above_maximum_is_rejected() {
        let server = get_test_server();
        let user_id = create_user(&server, "ada@example.com").await;
        let category_id = create_category(&server).await;
        let huge_credit = json!({
            "userId": user_id,
            "categoryId": category_id,
            "type": "credit",
            "amount": 5e28
        });

        for _ in 0..2 {
            let response = server.post(endpoints::TRANSACTIONS_API).json(&huge_credit).await;

            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(
                response.json::<ErrorResponse>().code,
                ErrorCode::ValidationFailed
            );
        }

        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "userId": user_id,
                "categoryId": category_id,
                "type": "credit",
                "amount": 1_000_000_000_000_000_i64
            }))
            .await
            .assert_status(StatusCode::CREATED);
        assert_eq!(
            get_balance(&server, user_id).await,
            Some(Decimal::from(1_000_000_000_000_000_i64))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writes_do_not_lose_updates() {
        let server = get_test_server();
        let user_id = create_user(&server, "ada@example.com").await;
        let category_id = create_category(&server).await;
        let mut requests = JoinSet::new();

        for i in 1..=20 {
            let transaction_type = if i % 3 == 0 { "debit" } else { "credit" };
            let request = server.post(endpoints::TRANSACTIONS_API).json(&json!({
                "userId": user_id,
                "categoryId": category_id,
                "type": transaction_type,
                "amount": i
            }));

            requests.spawn(async move { request.await.status_code() });
        }

        while let Some(status) = requests.join_next().await {
            assert_eq!(status.expect("request task panicked"), StatusCode::CREATED);
        }

        let transactions = server
            .get(endpoints::TRANSACTIONS_API)
            .await
            .json::<Vec<TransactionDto>>();
        let expected: Decimal = transactions
            .iter()
            .map(|transaction| {
                let amount = transaction.amount.expect("stored transaction has an amount");
                match transaction.transaction_type.as_deref() {
                    Some("debit") => -amount,
                    _ => amount,
                }
            })
            .sum();

        assert_eq!(transactions.len(), 20);
        // Credits 1..=20 minus twice the debits 3, 6, .., 18.
        assert_eq!(expected, Decimal::from(210 - 2 * 63));
        assert_eq!(get_balance(&server, user_id).await, Some(expected));
    }

    #[tokio::test]
    async fn category_in_use_cannot_be_deleted() {
        let server = get_test_server();
        let user_id = create_user(&server, "ada@example.com").await;
        let category_id = create_category(&server).await;
        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({
                "userId": user_id,
                "categoryId": category_id,
                "type": "debit",
                "amount": 3
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .delete(&format_endpoint(endpoints::CATEGORY_API, category_id))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<ErrorResponse>().code,
            ErrorCode::EntityInUse
        );
    }

    #[tokio::test]
    async fn list_transactions_returns_all() {
        let server = get_test_server();
        let user_id = create_user(&server, "ada@example.com").await;
        let category_id = create_category(&server).await;
        for amount in [1, 2] {
            server
                .post(endpoints::TRANSACTIONS_API)
                .json(&json!({
                    "userId": user_id,
                    "categoryId": category_id,
                    "type": "credit",
                    "amount": amount
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        let amounts: Vec<_> = response
            .json::<Vec<TransactionDto>>()
            .into_iter()
            .filter_map(|transaction| transaction.amount)
            .collect();
        assert_eq!(amounts, vec![Decimal::from(1), Decimal::from(2)]);
    }
}
