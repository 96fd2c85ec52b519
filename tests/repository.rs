use chrono::Utc;
use diesel::prelude::*;

use bookstall::domain::book::{NewBook, UpdateBook};
use bookstall::domain::progress::ProgressUpdate;
use bookstall::domain::purchase::NewPurchase;
use bookstall::domain::types::{
    AuthorName, BookId, BookPrice, BookTitle, BookType, CategoryName, CompletionPercent,
    PaymentIntentRef, PaymentMethod, ReadingPosition, UserId,
};
use bookstall::repository::errors::RepositoryError;
use bookstall::repository::{
    BookListQuery, BookReader, BookWriter, DieselRepository, ProgressReader, ProgressWriter,
    PurchaseReader, PurchaseWriter,
};
use bookstall::schema::{categories, purchases};

mod common;

fn new_book(owner: i32, title: &str, book_type: BookType, price: f64, cats: &[&str]) -> NewBook {
    let now = Utc::now().naive_utc();
    NewBook {
        user_id: UserId::new(owner).expect("valid user id"),
        title: BookTitle::new(title).expect("valid title"),
        author: AuthorName::new("Frank Herbert").expect("valid author"),
        description: None,
        price: BookPrice::new(price).expect("valid price"),
        book_type,
        cover_url: Some("https://cdn.example.com/covers/1.jpg".to_string()),
        file_url: None,
        sample_url: None,
        audio_url: None,
        categories: cats
            .iter()
            .map(|c| CategoryName::new(*c).expect("valid category"))
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

fn new_purchase(user: i32, book_id: BookId) -> NewPurchase {
    NewPurchase {
        user_id: UserId::new(user).expect("valid user id"),
        book_id,
        payment_method: PaymentMethod::new("card").expect("valid method"),
        payment_intent: PaymentIntentRef::new("pi_test_1").expect("valid intent"),
    }
}

fn progress_update(user: i32, book_id: BookId, position: f64, percent: f64) -> ProgressUpdate {
    ProgressUpdate {
        user_id: UserId::new(user).expect("valid user id"),
        book_id,
        last_position: ReadingPosition::new(position).expect("valid position"),
        completion_percent: CompletionPercent::new(percent).expect("valid percent"),
    }
}

#[test]
fn create_book_resolves_and_links_categories() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_book(&new_book(1, "Dune", BookType::Ebook, 9.99, &["Sci-Fi", "Classics"]))
        .expect("should create book");

    let fetched = repo
        .get_book_by_id(created.id)
        .expect("should fetch book")
        .expect("book should exist");
    let names: Vec<&str> = fetched.categories.iter().map(|c| c.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Sci-Fi"));
    assert!(names.contains(&"Classics"));
}

#[test]
fn shared_category_names_reconcile_to_a_single_row() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .create_book(&new_book(1, "Dune", BookType::Ebook, 9.99, &["Science Fiction"]))
        .expect("should create first book");
    let second = repo
        .create_book(&new_book(2, "Hyperion", BookType::Ebook, 7.99, &["Science Fiction"]))
        .expect("should create second book");

    let mut conn = test_db.pool().get().expect("should get connection");
    let rows: i64 = categories::table
        .filter(categories::name.eq("Science Fiction"))
        .count()
        .get_result(&mut conn)
        .expect("should count categories");
    assert_eq!(rows, 1);

    for id in [first.id, second.id] {
        let book = repo
            .get_book_by_id(id)
            .expect("should fetch book")
            .expect("book should exist");
        assert_eq!(book.categories.len(), 1);
        assert_eq!(book.categories[0], "Science Fiction");
    }
}

#[test]
fn category_filter_and_search_narrow_the_listing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_book(&new_book(1, "Dune", BookType::Ebook, 9.99, &["Sci-Fi"]))
        .expect("should create book");
    repo.create_book(&new_book(1, "Whale Songs", BookType::Audio, 12.50, &["Nature"]))
        .expect("should create book");

    let (total, books) = repo
        .list_books(BookListQuery::default().search("dune"))
        .expect("should search books");
    assert_eq!(total, 1);
    assert_eq!(books[0].title, "Dune");

    let (total, _) = repo
        .list_books(
            BookListQuery::default().category(CategoryName::new("Nature").expect("valid name")),
        )
        .expect("should filter by category");
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_books(BookListQuery::default().book_type(BookType::Audio))
        .expect("should filter by type");
    assert_eq!(total, 1);

    let (total, page) = repo
        .list_books(BookListQuery::default().paginate(1, 0))
        .expect("should paginate");
    assert_eq!(total, 2);
    assert_eq!(page.len(), 1);
    // Newest first.
    assert_eq!(page[0].title, "Whale Songs");
}

#[test]
fn listing_by_owner_returns_only_their_books() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_book(&new_book(1, "Dune", BookType::Ebook, 9.99, &[]))
        .expect("should create book");
    repo.create_book(&new_book(2, "Hyperion", BookType::Ebook, 7.99, &[]))
        .expect("should create book");

    let books = repo
        .list_books_by_owner(UserId::new(1).expect("valid user id"))
        .expect("should list by owner");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
}

#[test]
fn purchase_snapshots_price_and_rejects_duplicates() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let dune = repo
        .create_book(&new_book(1, "Dune", BookType::Ebook, 9.99, &["Sci-Fi", "Classics"]))
        .expect("should create book");
    let buyer = UserId::new(42).expect("valid user id");

    assert!(!repo.check_ownership(buyer, dune.id).expect("should check"));

    let purchase = repo
        .create_purchase(&new_purchase(42, dune.id))
        .expect("should create purchase");
    assert_eq!(purchase.price, 9.99);
    assert!(repo.check_ownership(buyer, dune.id).expect("should check"));

    // A later price edit must not touch the recorded purchase.
    repo.update_book(
        dune.id,
        &UpdateBook {
            price: Some(BookPrice::new(14.99).expect("valid price")),
            ..Default::default()
        },
    )
    .expect("should update book");

    let library = repo.list_user_purchases(buyer).expect("should list purchases");
    assert_eq!(library.len(), 1);
    assert_eq!(library[0].purchase.price, 9.99);
    assert_eq!(library[0].title, "Dune");

    let err = repo
        .create_purchase(&new_purchase(42, dune.id))
        .expect_err("duplicate purchase should fail");
    assert!(matches!(err, RepositoryError::AlreadyOwned));

    let mut conn = test_db.pool().get().expect("should get connection");
    let rows: i64 = purchases::table
        .filter(purchases::user_id.eq(42))
        .filter(purchases::book_id.eq(dune.id.get()))
        .count()
        .get_result(&mut conn)
        .expect("should count purchases");
    assert_eq!(rows, 1);
}

#[test]
fn storage_constraint_rejects_racing_duplicate_inserts() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let dune = repo
        .create_book(&new_book(1, "Dune", BookType::Ebook, 9.99, &[]))
        .expect("should create book");
    repo.create_purchase(&new_purchase(42, dune.id))
        .expect("should create purchase");

    // Bypass the application-level pre-check: the UNIQUE(user_id, book_id)
    // constraint must reject the row on its own.
    let mut conn = test_db.pool().get().expect("should get connection");
    let now = Utc::now().naive_utc();
    let raw = diesel::insert_into(purchases::table)
        .values((
            purchases::user_id.eq(42),
            purchases::book_id.eq(dune.id.get()),
            purchases::price.eq(9.99_f64),
            purchases::payment_method.eq("card"),
            purchases::payment_intent.eq("pi_test_2"),
            purchases::created_at.eq(now),
        ))
        .execute(&mut conn);

    match raw.map_err(RepositoryError::from) {
        Err(RepositoryError::Conflict(_)) => {}
        other => panic!("expected uniqueness conflict, got {other:?}"),
    }
}

#[test]
fn missing_book_fails_purchase_with_not_found() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let err = repo
        .create_purchase(&new_purchase(42, BookId::new(777).expect("valid id")))
        .expect_err("purchase of missing book should fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn sales_aggregates_handle_empty_and_sold_books() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let dune = repo
        .create_book(&new_book(1, "Dune", BookType::Ebook, 9.99, &[]))
        .expect("should create book");
    let messiah = repo
        .create_book(&new_book(1, "Dune Messiah", BookType::Ebook, 7.50, &[]))
        .expect("should create book");

    let sales = repo.get_book_sales(dune.id).expect("should aggregate");
    assert_eq!(sales.count, 0);
    assert_eq!(sales.revenue, 0.0);

    repo.create_purchase(&new_purchase(42, dune.id))
        .expect("should create purchase");
    repo.create_purchase(&new_purchase(43, dune.id))
        .expect("should create purchase");

    let sales = repo.get_book_sales(dune.id).expect("should aggregate");
    assert_eq!(sales.count, 2);
    assert!((sales.revenue - 19.98).abs() < 1e-9);

    let report = repo
        .get_author_sales(UserId::new(1).expect("valid user id"))
        .expect("should build report");
    assert_eq!(report.len(), 2);
    // Revenue descending, zero-sale books included.
    assert_eq!(report[0].book_id, dune.id);
    assert_eq!(report[0].sales.count, 2);
    assert_eq!(report[1].book_id, messiah.id);
    assert_eq!(report[1].sales.count, 0);
    assert_eq!(report[1].sales.revenue, 0.0);
}

#[test]
fn progress_upsert_keeps_one_row_per_pair() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let dune = repo
        .create_book(&new_book(1, "Dune", BookType::Ebook, 9.99, &[]))
        .expect("should create book");
    let reader = UserId::new(42).expect("valid user id");

    assert!(repo
        .get_progress(reader, dune.id)
        .expect("should query progress")
        .is_none());

    repo.upsert_progress(&progress_update(42, dune.id, 10.0, 2.5))
        .expect("should insert progress");
    let updated = repo
        .upsert_progress(&progress_update(42, dune.id, 250.0, 62.5))
        .expect("should update progress");

    assert_eq!(updated.last_position, 250.0);
    assert_eq!(updated.completion_percent, 62.5);

    let rows = repo
        .list_user_progress(reader)
        .expect("should list progress");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].progress.last_position, 250.0);
    assert_eq!(rows[0].title, "Dune");
}
