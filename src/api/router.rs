use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, borrow_book, get_fine, list_available_books, list_member_loans, register_book,
    register_member, return_book,
};

/// Creates the API router with all lending endpoints
///
/// Catalog:
/// - POST /books - Add a book
/// - GET /books/available - List books that can be borrowed
///
/// Members:
/// - POST /members - Add a member
/// - GET /members/:id/loans - List a member's active loans
///
/// Loans:
/// - POST /loans - Borrow a book
/// - POST /loans/:id/return - Return a book
/// - GET /loans/:id/fine - Current overdue fine
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/books", post(register_book))
        .route("/books/available", get(list_available_books))
        .route("/members", post(register_member))
        .route("/members/:id/loans", get(list_member_loans))
        .route("/loans", post(borrow_book))
        .route("/loans/:id/return", post(return_book))
        .route("/loans/:id/fine", get(get_fine))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
