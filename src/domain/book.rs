use serde::{Deserialize, Serialize};

use super::BookId;

/// 書籍 - 蔵書1冊
///
/// 貸出可否フラグのみが貸出・返却で変化する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl Book {
    /// 蔵書登録時は貸出可能な状態で作成する
    pub fn new(id: impl Into<BookId>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            available: true,
        }
    }

    /// 貸出済みにした書籍を返す
    pub fn mark_borrowed(self) -> Self {
        Self {
            available: false,
            ..self
        }
    }

    /// 貸出可能に戻した書籍を返す
    pub fn mark_returned(self) -> Self {
        Self {
            available: true,
            ..self
        }
    }
}
