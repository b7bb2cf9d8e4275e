//! Debits and credits, and the balance reconciliation that follows every change to them.

mod api;
mod balance;
mod create;
mod db;
mod delete;
mod domain;
mod dto;
mod edit;
mod form;
mod list;
mod service;

pub use api::{
    create_transaction_api, delete_transaction_api, get_transaction_api, list_transactions_api,
    update_transaction_api,
};
pub use balance::{BalanceChange, apply_balance_changes, balance_changes};
pub use create::{create_transaction_endpoint, get_new_transaction_page};
pub use db::{
    count_transactions_in_category, count_transactions_per_category, create_transaction_table,
    get_all_transactions, get_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{
    Amount, MAX_AMOUNT, NewTransaction, Transaction, TransactionFormData, TransactionId,
    TransactionType,
};
pub use dto::TransactionDto;
pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use list::get_transactions_page;
pub use service::{create_transaction, delete_transaction, update_transaction};
