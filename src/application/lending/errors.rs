use thiserror::Error;

/// エラーの分類
///
/// 呼び出し側（API層など）はこの分類で分岐する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 必須の識別子が空
    Validation,
    /// 会員・書籍・貸出が見つからない
    NotFound,
    /// 書籍が貸出中
    Conflict,
    /// 貸出上限に達している
    LimitExceeded,
    /// 保存先の障害
    RepositoryFailure,
}

/// 貸出アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LendingError {
    /// 入力検証エラー（メッセージは項目ごと）
    #[error("{0}")]
    Validation(&'static str),

    #[error("Member not found")]
    MemberNotFound,

    #[error("Book not found")]
    BookNotFound,

    #[error("Loan not found")]
    LoanNotFound,

    /// 書籍が貸出不可
    #[error("Book is not available")]
    BookNotAvailable,

    /// 貸出上限を超えている
    #[error("Member has reached maximum borrowing limit of {max} books")]
    LoanLimitExceeded { max: usize },

    /// リポジトリの障害
    ///
    /// `operation` は "borrow book" / "return book" のような処理名。
    #[error("Failed to {operation}: {source}")]
    Repository {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LendingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LendingError::Validation(_) => ErrorKind::Validation,
            LendingError::MemberNotFound
            | LendingError::BookNotFound
            | LendingError::LoanNotFound => ErrorKind::NotFound,
            LendingError::BookNotAvailable => ErrorKind::Conflict,
            LendingError::LoanLimitExceeded { .. } => ErrorKind::LimitExceeded,
            LendingError::Repository { .. } => ErrorKind::RepositoryFailure,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LendingError>;
