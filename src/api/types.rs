use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Book, Loan, Member, Money};

/// 蔵書登録リクエスト（POST /books）
#[derive(Debug, Serialize, Deserialize)]
pub struct AddBookRequest {
    pub id: String,
    pub title: String,
    pub author: String,
}

impl AddBookRequest {
    pub fn to_book(self) -> Book {
        Book::new(self.id, self.title, self.author)
    }
}

/// 会員登録リクエスト（POST /members）
#[derive(Debug, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl AddMemberRequest {
    pub fn to_member(self) -> Member {
        Member::new(self.id, self.name, self.email)
    }
}

/// 貸出リクエスト（POST /loans）
#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowBookRequest {
    pub member_id: String,
    pub book_id: String,
}

/// 書籍レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title,
            author: book.author,
            available: book.available,
        }
    }
}

/// 会員レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name,
            email: member.email,
        }
    }
}

/// 貸出レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanResponse {
    pub loan_id: String,
    pub member_id: String,
    pub book_id: String,
    pub borrowed_at: DateTime<Utc>,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            loan_id: loan.id.to_string(),
            member_id: loan.member_id.to_string(),
            book_id: loan.book_id.to_string(),
            borrowed_at: loan.borrowed_at,
        }
    }
}

/// 貸出成功レスポンス（POST /loans）
#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowResponse {
    pub message: String,
    pub loan: LoanResponse,
}

/// メッセージのみのレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 延滞料金レスポンス（GET /loans/:id/fine）
#[derive(Debug, Serialize, Deserialize)]
pub struct FineResponse {
    pub loan_id: String,
    pub fine: Money,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
