use crate::domain::{Book, BookId};
use crate::ports::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{StoreError, lock};

/// In-memory implementation of BookRepository
///
/// Books are indexed by id, so lookups do not scan the catalog.
pub struct BookRepository {
    books: Mutex<BTreeMap<BookId, Book>>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn save(&self, book: Book) -> Result<()> {
        lock(&self.books, "book")?.insert(book.id.clone(), book);
        Ok(())
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>> {
        Ok(lock(&self.books, "book")?.get(id).cloned())
    }

    async fn update(&self, book: Book) -> Result<()> {
        let mut books = lock(&self.books, "book")?;
        match books.get_mut(&book.id) {
            Some(existing) => {
                *existing = book;
                Ok(())
            }
            None => Err(StoreError::Missing {
                entity: "book",
                id: book.id.to_string(),
            }
            .into()),
        }
    }

    async fn delete(&self, id: &BookId) -> Result<()> {
        lock(&self.books, "book")?.remove(id);
        Ok(())
    }

    /// Returns books ordered by id
    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(lock(&self.books, "book")?.values().cloned().collect())
    }
}
