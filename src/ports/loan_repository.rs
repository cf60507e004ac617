use crate::domain::{Loan, LoanId, MemberId};
use async_trait::async_trait;

use super::Result;

/// 貸出リポジトリポート
///
/// 保存されている貸出はすべて貸出中のもの（返却時に削除される）。
#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn save(&self, loan: Loan) -> Result<()>;

    /// 見つからない場合は `None`
    async fn find_by_id(&self, id: &LoanId) -> Result<Option<Loan>>;

    async fn update(&self, loan: Loan) -> Result<()>;

    async fn delete(&self, id: &LoanId) -> Result<()>;

    async fn find_all(&self) -> Result<Vec<Loan>>;

    /// 会員の貸出中の貸出を取得する
    ///
    /// 貸出上限（会員ごと最大5冊）の確認に使用される。
    async fn find_by_member_id(&self, member_id: &MemberId) -> Result<Vec<Loan>>;
}
