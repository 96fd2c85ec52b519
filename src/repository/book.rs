use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::book::{Book, NewBook, UpdateBook};
use crate::domain::types::{BookId, CategoryName, UserId};
use crate::models::book::{
    Book as DbBook, BookCategory as DbBookCategory, BookChanges, NewBook as DbNewBook,
};
use crate::models::category::NewCategory as DbNewCategory;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BookListQuery, BookReader, BookWriter, DieselRepository};

/// Resolve category names for a set of book ids in one query.
fn load_categories(
    conn: &mut SqliteConnection,
    book_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<CategoryName>>> {
    use crate::schema::{book_categories, categories};

    let rows: Vec<(i32, String)> = book_categories::table
        .inner_join(categories::table)
        .filter(book_categories::book_id.eq_any(book_ids))
        .select((book_categories::book_id, categories::name))
        .order(categories::name.asc())
        .load(conn)?;

    let mut map: HashMap<i32, Vec<CategoryName>> = HashMap::new();
    for (book_id, name) in rows {
        map.entry(book_id).or_default().push(CategoryName::new(name)?);
    }
    Ok(map)
}

/// Convert loaded rows into domain books with their categories attached.
fn hydrate_books(conn: &mut SqliteConnection, rows: Vec<DbBook>) -> RepositoryResult<Vec<Book>> {
    let ids: Vec<i32> = rows.iter().map(|b| b.id).collect();
    let mut categories = load_categories(conn, &ids)?;

    rows.into_iter()
        .map(|row| {
            let id = row.id;
            let mut book: Book = row.try_into()?;
            book.categories = categories.remove(&id).unwrap_or_default();
            Ok(book)
        })
        .collect()
}

/// Look up a category by name, inserting it on absence.
///
/// The UNIQUE constraint on `categories.name` is the authoritative guard:
/// when a concurrent transaction commits the same name between our select
/// and insert, the insert fails with a uniqueness violation and a single
/// re-read returns the now-existing row.
fn find_or_create_category(
    conn: &mut SqliteConnection,
    name: &CategoryName,
) -> RepositoryResult<i32> {
    use crate::schema::categories;

    let existing = categories::table
        .filter(categories::name.eq(name.as_str()))
        .select(categories::id)
        .first::<i32>(conn)
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let new_category = DbNewCategory {
        name: name.as_str().to_string(),
        created_at: Utc::now().naive_utc(),
    };
    let inserted = diesel::insert_into(categories::table)
        .values(&new_category)
        .returning(categories::id)
        .get_result::<i32>(conn);

    match inserted.map_err(RepositoryError::from) {
        Ok(id) => Ok(id),
        Err(RepositoryError::Conflict(_)) => categories::table
            .filter(categories::name.eq(name.as_str()))
            .select(categories::id)
            .first::<i32>(conn)
            .optional()?
            .ok_or_else(|| {
                RepositoryError::Conflict(format!(
                    "category '{name}' vanished after uniqueness conflict"
                ))
            }),
        Err(other) => Err(other),
    }
}

impl BookReader for DieselRepository {
    fn list_books(&self, query: BookListQuery) -> RepositoryResult<(usize, Vec<Book>)> {
        use crate::schema::{book_categories, books, categories};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = books::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    books::title
                        .like(pattern.clone())
                        .or(books::author.like(pattern)),
                );
            }

            if let Some(category) = &query.category {
                items = items.filter(
                    books::id.eq_any(
                        book_categories::table
                            .filter(
                                book_categories::category_id.eq_any(
                                    categories::table
                                        .filter(categories::name.eq(category.as_str()))
                                        .select(categories::id),
                                ),
                            )
                            .select(book_categories::book_id),
                    ),
                );
            }

            if let Some(book_type) = query.book_type {
                items = items.filter(books::book_type.eq(book_type.as_str()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset as i64)
                .limit(pagination.limit as i64);
        }

        let rows = items
            .order(books::created_at.desc())
            .load::<DbBook>(&mut conn)?;

        Ok((total, hydrate_books(&mut conn, rows)?))
    }

    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>> {
        use crate::schema::books;

        let mut conn = self.conn()?;

        let row = books::table
            .filter(books::id.eq(id.get()))
            .first::<DbBook>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(hydrate_books(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn list_books_by_owner(&self, user_id: UserId) -> RepositoryResult<Vec<Book>> {
        use crate::schema::books;

        let mut conn = self.conn()?;

        let rows = books::table
            .filter(books::user_id.eq(user_id.get()))
            .order(books::created_at.desc())
            .load::<DbBook>(&mut conn)?;

        hydrate_books(&mut conn, rows)
    }
}

impl BookWriter for DieselRepository {
    fn create_book(&self, book: &NewBook) -> RepositoryResult<Book> {
        use crate::schema::{book_categories, books};

        let mut conn = self.conn()?;

        conn.transaction::<Book, RepositoryError, _>(|conn| {
            let db_book: DbNewBook = book.clone().into();
            let inserted = diesel::insert_into(books::table)
                .values(db_book)
                .returning(DbBook::as_returning())
                .get_result::<DbBook>(conn)?;

            let mut names: Vec<CategoryName> = Vec::new();
            for name in &book.categories {
                if names.contains(name) {
                    continue;
                }
                let category_id = find_or_create_category(conn, name)?;
                diesel::insert_into(book_categories::table)
                    .values(&DbBookCategory {
                        book_id: inserted.id,
                        category_id,
                    })
                    .on_conflict_do_nothing()
                    .execute(conn)?;
                names.push(name.clone());
            }

            let mut created: Book = inserted.try_into()?;
            created.categories = names;
            Ok(created)
        })
    }

    fn update_book(&self, id: BookId, changes: &UpdateBook) -> RepositoryResult<Book> {
        use crate::schema::books;

        let mut conn = self.conn()?;

        let changeset = BookChanges {
            title: changes.title.clone().map(Into::into),
            author: changes.author.clone().map(Into::into),
            description: changes.description.clone(),
            price: changes.price.map(|p| p.get()),
            updated_at: Utc::now().naive_utc(),
        };

        let updated = diesel::update(books::table.filter(books::id.eq(id.get())))
            .set(changeset)
            .returning(DbBook::as_returning())
            .get_result::<DbBook>(&mut conn)?;

        Ok(hydrate_books(&mut conn, vec![updated])?
            .pop()
            .ok_or(RepositoryError::NotFound)?)
    }
}
