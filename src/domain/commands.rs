use chrono::{DateTime, Utc};

/// 書籍を借りるコマンド
///
/// IDは未検証の入力として受け取り、貸出サービスで検証する。
#[derive(Debug, Clone)]
pub struct BorrowBook {
    pub member_id: String,
    pub book_id: String,
    pub borrowed_at: DateTime<Utc>,
}

/// 書籍を返却するコマンド
#[derive(Debug, Clone)]
pub struct ReturnBook {
    pub loan_id: String,
}
