use axum_test::TestServer;
use rusqlite::Connection;

use crate::{AppState, build_router};

/// An [AppState] backed by a fresh in-memory database with the schema in place.
pub(crate) fn get_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection).expect("Could not initialize app state")
}

/// A server for the full application router backed by a fresh in-memory database.
pub(crate) fn get_test_server() -> TestServer {
    TestServer::try_new(build_router(get_test_state())).expect("Could not create test server.")
}
