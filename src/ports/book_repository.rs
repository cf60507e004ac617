use crate::domain::{Book, BookId};
use async_trait::async_trait;

use super::Result;

/// 書籍リポジトリポート
///
/// 貸出処理を保存媒体から切り離す。ビジネスルールは持たない。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 書籍を保存する（同じIDがあれば上書き）
    async fn save(&self, book: Book) -> Result<()>;

    /// IDで書籍を取得する
    ///
    /// 見つからない場合はエラーではなく `None` を返す。
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>>;

    /// 既存の書籍を更新する
    async fn update(&self, book: Book) -> Result<()>;

    async fn delete(&self, id: &BookId) -> Result<()>;

    async fn find_all(&self) -> Result<Vec<Book>>;
}
