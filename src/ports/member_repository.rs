use crate::domain::{Member, MemberId};
use async_trait::async_trait;

use super::Result;

/// 会員リポジトリポート
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn save(&self, member: Member) -> Result<()>;

    /// 見つからない場合は `None`
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>>;

    async fn update(&self, member: Member) -> Result<()>;

    async fn delete(&self, id: &MemberId) -> Result<()>;

    async fn find_all(&self) -> Result<Vec<Member>>;
}
