use axum::body::Body;
use axum::http::{Request, StatusCode};
use library_lending::adapters::memory::{BookRepository, LoanRepository, MemberRepository};
use library_lending::api::handlers::AppState;
use library_lending::api::router::create_router;
use library_lending::api::types::*;
use library_lending::application::lending::{LendingPolicy, ServiceDependencies};
use library_lending::domain::DailyRateFine;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// E2Eテスト用のアプリケーションセットアップ
///
/// インメモリのリポジトリと実際のAPIルーターを使用する。
fn setup_e2e_app() -> axum::Router {
    let service_deps = ServiceDependencies {
        book_repository: Arc::new(BookRepository::new()),
        member_repository: Arc::new(MemberRepository::new()),
        loan_repository: Arc::new(LoanRepository::new()),
        fine_strategy: Arc::new(DailyRateFine::standard()),
        policy: LendingPolicy::default(),
    };

    create_router(Arc::new(AppState { service_deps }))
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body.to_vec())
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}

/// テスト用の会員と本を登録
async fn setup_test_entities(app: &axum::Router) {
    let (status, _) = send(
        app,
        "POST",
        "/members",
        Some(json!({ "id": "member1", "name": "John Doe", "email": "john@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/books",
        Some(json!({ "id": "book1", "title": "Java Programming", "author": "Author Name" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// ============================================================================
// E2Eテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_e2e_full_lending_flow() {
    let app = setup_e2e_app();
    setup_test_entities(&app).await;

    // Step 1: 貸出（POST /loans）
    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "member_id": "member1", "book_id": "book1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let borrowed: BorrowResponse = parse(&body);
    assert_eq!(borrowed.message, "Book borrowed successfully");
    assert_eq!(borrowed.loan.member_id, "member1");
    assert_eq!(borrowed.loan.book_id, "book1");
    let loan_id = borrowed.loan.loan_id;

    // Step 2: 貸出可能な書籍から消えている
    let (status, body) = send(&app, "GET", "/books/available", None).await;
    assert_eq!(status, StatusCode::OK);
    let books: Vec<BookResponse> = parse(&body);
    assert!(books.is_empty());

    // Step 3: 会員の貸出一覧
    let (status, body) = send(&app, "GET", "/members/member1/loans", None).await;
    assert_eq!(status, StatusCode::OK);
    let loans: Vec<LoanResponse> = parse(&body);
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].loan_id, loan_id);

    // Step 4: 借りたばかりなので延滞料金は0
    let (status, body) = send(&app, "GET", &format!("/loans/{}/fine", loan_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let fine: FineResponse = parse(&body);
    assert!(fine.fine.is_zero());

    // Step 5: 返却（POST /loans/:id/return）
    let (status, body) = send(&app, "POST", &format!("/loans/{}/return", loan_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let returned: MessageResponse = parse(&body);
    assert_eq!(returned.message, "Book returned successfully");

    // Step 6: 書籍が再び貸出可能
    let (_, body) = send(&app, "GET", "/books/available", None).await;
    let books: Vec<BookResponse> = parse(&body);
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "book1");
    assert!(books[0].available);

    let (_, body) = send(&app, "GET", "/members/member1/loans", None).await;
    let loans: Vec<LoanResponse> = parse(&body);
    assert!(loans.is_empty());
}

// ============================================================================
// E2Eテスト: 異常系
// ============================================================================

#[tokio::test]
async fn test_e2e_borrow_unknown_member_returns_404() {
    let app = setup_e2e_app();
    setup_test_entities(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "member_id": "ghost", "book_id": "book1" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "MEMBER_NOT_FOUND");
    assert_eq!(error.message, "Member not found");
}

#[tokio::test]
async fn test_e2e_borrow_blank_member_returns_400() {
    let app = setup_e2e_app();
    setup_test_entities(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "member_id": "", "book_id": "book1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_e2e_borrow_unavailable_book_returns_409() {
    let app = setup_e2e_app();
    setup_test_entities(&app).await;

    let request = json!({ "member_id": "member1", "book_id": "book1" });
    let (status, _) = send(&app, "POST", "/loans", Some(request.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/loans", Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "BOOK_NOT_AVAILABLE");
}

#[tokio::test]
async fn test_e2e_loan_limit_returns_422() {
    let app = setup_e2e_app();
    setup_test_entities(&app).await;

    for i in 0..6 {
        let (status, _) = send(
            &app,
            "POST",
            "/books",
            Some(json!({ "id": format!("book-{}", i), "title": "Title", "author": "Author" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    for i in 0..5 {
        let (status, _) = send(
            &app,
            "POST",
            "/loans",
            Some(json!({ "member_id": "member1", "book_id": format!("book-{}", i) })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "member_id": "member1", "book_id": "book-5" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "LOAN_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn test_e2e_return_unknown_loan_returns_404() {
    let app = setup_e2e_app();

    let (status, body) = send(&app, "POST", "/loans/no-such-loan/return", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "LOAN_NOT_FOUND");
}

#[tokio::test]
async fn test_e2e_register_blank_book_returns_422() {
    let app = setup_e2e_app();

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "id": " ", "title": "Title", "author": "Author" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "INVALID_BOOK");

    let (_, body) = send(&app, "GET", "/books/available", None).await;
    let books: Vec<BookResponse> = parse(&body);
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_e2e_register_duplicate_book_returns_422() {
    let app = setup_e2e_app();
    setup_test_entities(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({ "member_id": "member1", "book_id": "book1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "id": "book1", "title": "Java Programming", "author": "Author Name" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "INVALID_BOOK");

    let (_, body) = send(&app, "GET", "/books/available", None).await;
    let books: Vec<BookResponse> = parse(&body);
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_e2e_fine_for_unknown_loan_is_zero() {
    let app = setup_e2e_app();

    let (status, body) = send(&app, "GET", "/loans/unknown/fine", None).await;

    assert_eq!(status, StatusCode::OK);
    let fine: FineResponse = parse(&body);
    assert_eq!(fine.loan_id, "unknown");
    assert_eq!(fine.fine.to_string(), "0.00");
}

#[tokio::test]
async fn test_e2e_health_check() {
    let app = setup_e2e_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}
