use crate::domain::{
    Book, BookId, FineStrategy, Loan, LoanId, Member, MemberId, Money, commands::*,
    loan::LOAN_PERIOD_DAYS, value_objects::is_blank,
};
use crate::ports::*;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::errors::{LendingError, Result};

/// 会員1人あたりの最大貸出冊数
const MAX_ACTIVE_LOANS: usize = 5;

/// 貸出成功時のメッセージ
pub const BORROW_SUCCESS_MESSAGE: &str = "Book borrowed successfully";

/// 返却成功時のメッセージ
pub const RETURN_SUCCESS_MESSAGE: &str = "Book returned successfully";

const BORROW_OPERATION: &str = "borrow book";
const RETURN_OPERATION: &str = "return book";

type PortError = Box<dyn std::error::Error + Send + Sync>;

/// 貸出ルールの設定値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LendingPolicy {
    /// 会員1人あたりの最大貸出冊数
    pub max_active_loans: usize,
    /// 延滞料金の起算に使う貸出期間（日数）
    pub loan_duration_days: i64,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            max_active_loans: MAX_ACTIVE_LOANS,
            loan_duration_days: LOAN_PERIOD_DAYS,
        }
    }
}

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、各関数に依存関係を渡す。
/// 保存先はリポジトリポート経由で差し替え可能。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_repository: Arc<dyn BookRepository>,
    pub member_repository: Arc<dyn MemberRepository>,
    pub loan_repository: Arc<dyn LoanRepository>,
    pub fine_strategy: Arc<dyn FineStrategy>,
    pub policy: LendingPolicy,
}

/// リポジトリ障害をアプリケーション層のエラーに変換するクロージャを返す
fn repository_failure(operation: &'static str) -> impl FnOnce(PortError) -> LendingError {
    move |source| {
        tracing::error!(operation, error = %source, "Repository call failed");
        LendingError::Repository { operation, source }
    }
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 会員IDと書籍IDが空でないこと
/// - 会員が存在すること
/// - 書籍が存在し、貸出可能であること
/// - 会員の貸出中の冊数が上限（5冊）未満であること
///
/// # 一貫性保証
///
/// 貸出の保存と書籍の貸出不可への更新は1つの単位として扱う。
/// 書籍の更新に失敗した場合は保存済みの貸出を削除してから失敗を返す。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 貸出コマンド
///
/// # 戻り値
/// 成功時は作成された貸出
pub async fn borrow_book(deps: &ServiceDependencies, cmd: BorrowBook) -> Result<Loan> {
    // 1. 入力検証
    if is_blank(&cmd.member_id) {
        return Err(LendingError::Validation("Member ID cannot be null or empty"));
    }
    if is_blank(&cmd.book_id) {
        return Err(LendingError::Validation("Book ID cannot be null or empty"));
    }

    let member_id = MemberId::from(cmd.member_id);
    let book_id = BookId::from(cmd.book_id);

    // 2. 会員の存在確認
    let member = deps
        .member_repository
        .find_by_id(&member_id)
        .await
        .map_err(repository_failure(BORROW_OPERATION))?;

    if member.is_none() {
        return Err(LendingError::MemberNotFound);
    }

    // 3. 書籍の存在・貸出可能性確認
    let book = deps
        .book_repository
        .find_by_id(&book_id)
        .await
        .map_err(repository_failure(BORROW_OPERATION))?
        .ok_or(LendingError::BookNotFound)?;

    if !book.available {
        return Err(LendingError::BookNotAvailable);
    }

    // 4. 貸出上限確認
    let active_loans = deps
        .loan_repository
        .find_by_member_id(&member_id)
        .await
        .map_err(repository_failure(BORROW_OPERATION))?;

    if active_loans.len() >= deps.policy.max_active_loans {
        return Err(LendingError::LoanLimitExceeded {
            max: deps.policy.max_active_loans,
        });
    }

    // 5. 貸出を作成して保存
    let loan = Loan::open(member_id, book_id, cmd.borrowed_at);

    deps.loan_repository
        .save(loan.clone())
        .await
        .map_err(repository_failure(BORROW_OPERATION))?;

    // 6. 書籍を貸出不可に更新（失敗したら貸出を取り消す）
    if let Err(e) = deps.book_repository.update(book.mark_borrowed()).await {
        if let Err(rollback) = deps.loan_repository.delete(&loan.id).await {
            tracing::error!(
                loan_id = %loan.id,
                error = %rollback,
                "Failed to roll back loan after book update failure"
            );
        }
        return Err(repository_failure(BORROW_OPERATION)(e));
    }

    tracing::info!(
        loan_id = %loan.id,
        member_id = %loan.member_id,
        book_id = %loan.book_id,
        "Book borrowed"
    );

    Ok(loan)
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 貸出IDが空でないこと
/// - 貸出が存在すること
/// - 書籍の記録が見つからなくても貸出は削除する
///
/// # 一貫性保証
///
/// 書籍を貸出可能に戻してから貸出を削除する。
/// 削除に失敗した場合は書籍を貸出不可に戻してから失敗を返す。
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<()> {
    // 1. 入力検証
    if is_blank(&cmd.loan_id) {
        return Err(LendingError::Validation("Loan ID cannot be null or empty"));
    }

    let loan_id = LoanId::from(cmd.loan_id);

    // 2. 貸出の取得
    let loan = deps
        .loan_repository
        .find_by_id(&loan_id)
        .await
        .map_err(repository_failure(RETURN_OPERATION))?
        .ok_or(LendingError::LoanNotFound)?;

    // 3. 書籍を貸出可能に戻す
    let book = deps
        .book_repository
        .find_by_id(&loan.book_id)
        .await
        .map_err(repository_failure(RETURN_OPERATION))?;

    let restored = match book {
        Some(book) => {
            let book = book.mark_returned();
            deps.book_repository
                .update(book.clone())
                .await
                .map_err(repository_failure(RETURN_OPERATION))?;
            Some(book)
        }
        None => {
            tracing::warn!(
                loan_id = %loan.id,
                book_id = %loan.book_id,
                "Book record missing on return; deleting loan anyway"
            );
            None
        }
    };

    // 4. 貸出を削除（失敗したら書籍の状態を戻す）
    if let Err(e) = deps.loan_repository.delete(&loan.id).await {
        if let Some(book) = restored {
            if let Err(rollback) = deps.book_repository.update(book.mark_borrowed()).await {
                tracing::error!(
                    book_id = %loan.book_id,
                    error = %rollback,
                    "Failed to roll back book availability after loan delete failure"
                );
            }
        }
        return Err(repository_failure(RETURN_OPERATION)(e));
    }

    tracing::info!(loan_id = %loan.id, book_id = %loan.book_id, "Book returned");

    Ok(())
}

/// 貸出可能な書籍の一覧
///
/// 保存先の障害時はエラーを返さず空の一覧を返す。
pub async fn get_available_books(deps: &ServiceDependencies) -> Vec<Book> {
    match deps.book_repository.find_all().await {
        Ok(books) => books.into_iter().filter(|b| b.available).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to list books; returning empty list");
            Vec::new()
        }
    }
}

/// 会員の貸出中の貸出一覧
///
/// 会員IDが空、または保存先の障害時は空の一覧を返す。
pub async fn get_member_loans(deps: &ServiceDependencies, member_id: &str) -> Vec<Loan> {
    if is_blank(member_id) {
        return Vec::new();
    }

    match deps
        .loan_repository
        .find_by_member_id(&MemberId::from(member_id))
        .await
    {
        Ok(loans) => loans,
        Err(e) => {
            tracing::warn!(member_id, error = %e, "Failed to list member loans; returning empty list");
            Vec::new()
        }
    }
}

/// 現時点での延滞料金を計算する
pub async fn calculate_fine(deps: &ServiceDependencies, loan_id: &str) -> Money {
    calculate_fine_at(deps, loan_id, Utc::now()).await
}

/// 指定時点での延滞料金を計算する
///
/// 貸出IDが空、貸出が存在しない、または保存先の障害時は0を返す。
pub async fn calculate_fine_at(
    deps: &ServiceDependencies,
    loan_id: &str,
    as_of: DateTime<Utc>,
) -> Money {
    if is_blank(loan_id) {
        return Money::ZERO;
    }

    match deps.loan_repository.find_by_id(&LoanId::from(loan_id)).await {
        Ok(Some(loan)) => {
            deps.fine_strategy
                .calculate_fine(&loan, deps.policy.loan_duration_days, as_of)
        }
        Ok(None) => Money::ZERO,
        Err(e) => {
            tracing::warn!(loan_id, error = %e, "Failed to load loan for fine; assuming zero");
            Money::ZERO
        }
    }
}

/// 書籍を蔵書に登録する
///
/// IDが空の場合、または同じIDの書籍が既に登録されている場合は保存せず `false` を返す。
/// 既存の記録（貸出状態を含む）を上書きすることはない。
pub async fn add_book(deps: &ServiceDependencies, book: Book) -> bool {
    if book.id.is_blank() {
        tracing::debug!("Rejected book with blank id");
        return false;
    }

    match deps.book_repository.find_by_id(&book.id).await {
        Ok(None) => {}
        Ok(Some(_)) => {
            tracing::info!(book_id = %book.id, "Rejected already registered book");
            return false;
        }
        Err(e) => {
            tracing::error!(book_id = %book.id, error = %e, "Failed to look up book before save");
            return false;
        }
    }

    match deps.book_repository.save(book).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Failed to save book");
            false
        }
    }
}

/// 会員を登録する
///
/// IDが空の場合は保存せず `false` を返す。
pub async fn add_member(deps: &ServiceDependencies, member: Member) -> bool {
    if member.id.is_blank() {
        tracing::debug!("Rejected member with blank id");
        return false;
    }

    match deps.member_repository.save(member).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Failed to save member");
            false
        }
    }
}
