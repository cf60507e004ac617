pub mod book_repository;
pub mod loan_repository;
pub mod member_repository;

pub use book_repository::BookRepository;
pub use loan_repository::LoanRepository;
pub use member_repository::MemberRepository;

use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// インメモリストアのエラー
#[derive(Debug, Error)]
pub enum StoreError {
    /// 別スレッドのパニックでロックが汚染された
    #[error("{0} store lock poisoned")]
    LockPoisoned(&'static str),

    /// 更新対象が存在しない
    #[error("{entity} {id} does not exist")]
    Missing { entity: &'static str, id: String },
}

/// ロックを取得し、汚染されていればストアのエラーに変換する
pub(crate) fn lock<'a, T>(
    store: &'a Mutex<T>,
    entity: &'static str,
) -> Result<MutexGuard<'a, T>, StoreError> {
    store.lock().map_err(|_| StoreError::LockPoisoned(entity))
}
