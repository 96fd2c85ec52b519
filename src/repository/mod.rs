use crate::db::{DbConnection, DbPool};
use crate::domain::book::{Book, NewBook, UpdateBook};
use crate::domain::progress::{ProgressUpdate, ProgressWithBook, ReadingProgress};
use crate::domain::purchase::{AuthorBookSales, BookSales, NewPurchase, Purchase, PurchaseWithBook};
use crate::domain::types::{BookId, BookType, CategoryName, UserId};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod book;
pub mod errors;
pub mod progress;
pub mod purchase;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing or searching the catalog.
#[derive(Debug, Clone, Default)]
pub struct BookListQuery {
    /// Case-insensitive substring match against title or author.
    pub search: Option<String>,
    /// Restrict to books linked to this category name (exact match).
    pub category: Option<CategoryName>,
    /// Restrict to books of this type.
    pub book_type: Option<BookType>,
    /// Limit/offset paging.
    pub pagination: Option<Pagination>,
}

impl BookListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn category(mut self, category: CategoryName) -> Self {
        self.category = Some(category);
        self
    }
    pub fn book_type(mut self, book_type: BookType) -> Self {
        self.book_type = Some(book_type);
        self
    }
    pub fn paginate(mut self, limit: usize, offset: usize) -> Self {
        self.pagination = Some(Pagination::new(limit, offset));
        self
    }
}

/// Read-only operations over the catalog.
pub trait BookReader {
    /// List books matching the supplied query, newest first, with resolved
    /// category names.
    fn list_books(&self, query: BookListQuery) -> RepositoryResult<(usize, Vec<Book>)>;
    /// Retrieve a book by its identifier. Absence is `Ok(None)`, not an error.
    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>>;
    /// List books uploaded by a user, newest first.
    fn list_books_by_owner(&self, user_id: UserId) -> RepositoryResult<Vec<Book>>;
}

/// Write operations over the catalog.
pub trait BookWriter {
    /// Insert a book and reconcile its category names in one atomic unit.
    fn create_book(&self, book: &NewBook) -> RepositoryResult<Book>;
    /// Apply explicit field updates to an existing book.
    fn update_book(&self, id: BookId, changes: &UpdateBook) -> RepositoryResult<Book>;
}

/// Read-only operations over the purchase ledger.
pub trait PurchaseReader {
    /// Whether a purchase row exists for the pair.
    fn check_ownership(&self, user_id: UserId, book_id: BookId) -> RepositoryResult<bool>;
    /// Purchases made by a user joined with book metadata, newest first.
    fn list_user_purchases(&self, user_id: UserId) -> RepositoryResult<Vec<PurchaseWithBook>>;
    /// Sales count and revenue for a book. Zero purchases yields zeros.
    fn get_book_sales(&self, book_id: BookId) -> RepositoryResult<BookSales>;
    /// Per-book sales for every book owned by the user, revenue descending.
    /// Books with zero sales are included.
    fn get_author_sales(&self, user_id: UserId) -> RepositoryResult<Vec<AuthorBookSales>>;
}

/// Write operations over the purchase ledger.
pub trait PurchaseWriter {
    /// Record a purchase, snapshotting the book's current price.
    ///
    /// Fails with [`errors::RepositoryError::AlreadyOwned`] when the pair
    /// already exists, whether detected by the pre-check or by the storage
    /// uniqueness constraint under a race.
    fn create_purchase(&self, purchase: &NewPurchase) -> RepositoryResult<Purchase>;
}

/// Read-only operations over reading progress.
pub trait ProgressReader {
    /// Retrieve the progress row for a pair, if any.
    fn get_progress(
        &self,
        user_id: UserId,
        book_id: BookId,
    ) -> RepositoryResult<Option<ReadingProgress>>;
    /// All progress rows for a user with joined book metadata, most recently
    /// updated first.
    fn list_user_progress(&self, user_id: UserId) -> RepositoryResult<Vec<ProgressWithBook>>;
}

/// Write operations over reading progress.
pub trait ProgressWriter {
    /// Insert-or-update the row for the pair as a single statement.
    fn upsert_progress(&self, update: &ProgressUpdate) -> RepositoryResult<ReadingProgress>;
}
