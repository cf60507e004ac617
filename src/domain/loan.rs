use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, LoanId, MemberId};

/// 標準の貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出 - 1人の会員による1冊の書籍の貸出記録
///
/// 貸出成立時に作成され、返却時に削除される。
/// 貸出が存在する間、参照先の書籍は貸出不可でなければならない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub member_id: MemberId,
    pub book_id: BookId,
    pub borrowed_at: DateTime<Utc>,
}

impl Loan {
    /// 純粋関数：新しい貸出を作成する
    ///
    /// 貸出IDはここで採番する。永続化は呼び出し側の責務。
    pub fn open(member_id: MemberId, book_id: BookId, borrowed_at: DateTime<Utc>) -> Self {
        Self {
            id: LoanId::generate(),
            member_id,
            book_id,
            borrowed_at,
        }
    }
}
