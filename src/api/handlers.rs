use crate::application::lending::{
    self, BORROW_SUCCESS_MESSAGE, RETURN_SUCCESS_MESSAGE, ServiceDependencies,
};
use crate::domain::commands::{BorrowBook, ReturnBook};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        AddBookRequest, AddMemberRequest, BookResponse, BorrowBookRequest, BorrowResponse,
        ErrorResponse, FineResponse, LoanResponse, MemberResponse, MessageResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Registration handlers (POST)
// ============================================================================

/// POST /books - 蔵書を登録
///
/// IDが空、または登録済みのIDの場合は422を返す。
pub async fn register_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), RegistrationError> {
    let book = req.to_book();

    if !lending::add_book(&state.service_deps, book.clone()).await {
        return Err(RegistrationError::Book);
    }

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// POST /members - 会員を登録
pub async fn register_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), RegistrationError> {
    let member = req.to_member();

    if !lending::add_member(&state.service_deps, member.clone()).await {
        return Err(RegistrationError::Member);
    }

    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /loans - 書籍を貸し出す
///
/// 強制されるビジネスルール:
/// - 会員が存在すること
/// - 書籍が存在し貸出可能であること
/// - 会員の貸出数が上限（5冊）未満であること
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BorrowBookRequest>,
) -> Result<(StatusCode, Json<BorrowResponse>), ApiError> {
    let cmd = BorrowBook {
        member_id: req.member_id,
        book_id: req.book_id,
        borrowed_at: chrono::Utc::now(),
    };

    let loan = lending::borrow_book(&state.service_deps, cmd).await?;

    let response = BorrowResponse {
        message: BORROW_SUCCESS_MESSAGE.to_string(),
        loan: LoanResponse::from(loan),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /loans/:id/return - 書籍を返却
///
/// 書籍の記録がなくても貸出は削除される。
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    lending::return_book(&state.service_deps, ReturnBook { loan_id }).await?;

    Ok(Json(MessageResponse {
        message: RETURN_SUCCESS_MESSAGE.to_string(),
    }))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books/available - 貸出可能な書籍一覧
pub async fn list_available_books(State(state): State<Arc<AppState>>) -> Json<Vec<BookResponse>> {
    let books = lending::get_available_books(&state.service_deps).await;
    Json(books.into_iter().map(BookResponse::from).collect())
}

/// GET /members/:id/loans - 会員の貸出中一覧
pub async fn list_member_loans(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<String>,
) -> Json<Vec<LoanResponse>> {
    let loans = lending::get_member_loans(&state.service_deps, &member_id).await;
    Json(loans.into_iter().map(LoanResponse::from).collect())
}

/// GET /loans/:id/fine - 現時点の延滞料金
///
/// 貸出が存在しない場合も0を返す。
pub async fn get_fine(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<String>,
) -> Json<FineResponse> {
    let fine = lending::calculate_fine(&state.service_deps, &loan_id).await;
    Json(FineResponse { loan_id, fine })
}

// ============================================================================
// Error types
// ============================================================================

/// 登録ハンドラー用のエラー型
#[derive(Debug)]
pub enum RegistrationError {
    Book,
    Member,
}

impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        let (error_type, message) = match self {
            RegistrationError::Book => ("INVALID_BOOK", "Book could not be added"),
            RegistrationError::Member => ("INVALID_MEMBER", "Member could not be added"),
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}
