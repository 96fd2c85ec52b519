use chrono::Utc;
use diesel::prelude::*;

use crate::domain::purchase::{
    AuthorBookSales, BookSales, NewPurchase, Purchase, PurchaseWithBook,
};
use crate::domain::types::{BookId, BookTitle, UserId};
use crate::models::purchase::{NewPurchase as DbNewPurchase, Purchase as DbPurchase};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, PurchaseReader, PurchaseWriter};

impl PurchaseReader for DieselRepository {
    fn check_ownership(&self, user_id: UserId, book_id: BookId) -> RepositoryResult<bool> {
        use crate::schema::purchases;

        let mut conn = self.conn()?;

        let existing = purchases::table
            .filter(purchases::user_id.eq(user_id.get()))
            .filter(purchases::book_id.eq(book_id.get()))
            .select(purchases::id)
            .first::<i32>(&mut conn)
            .optional()?;

        Ok(existing.is_some())
    }

    fn list_user_purchases(&self, user_id: UserId) -> RepositoryResult<Vec<PurchaseWithBook>> {
        use crate::schema::{books, purchases};

        let mut conn = self.conn()?;

        let rows: Vec<(DbPurchase, String, String, Option<String>, String)> = purchases::table
            .inner_join(books::table)
            .filter(purchases::user_id.eq(user_id.get()))
            .order(purchases::created_at.desc())
            .select((
                DbPurchase::as_select(),
                books::title,
                books::author,
                books::cover_url,
                books::book_type,
            ))
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| Ok(PurchaseWithBook::try_from(row)?))
            .collect()
    }

    fn get_book_sales(&self, book_id: BookId) -> RepositoryResult<BookSales> {
        use crate::schema::purchases;

        let mut conn = self.conn()?;

        let (count, revenue) = purchases::table
            .filter(purchases::book_id.eq(book_id.get()))
            .select((
                diesel::dsl::count_star(),
                diesel::dsl::sum(purchases::price),
            ))
            .first::<(i64, Option<f64>)>(&mut conn)?;

        Ok(BookSales {
            count: count as usize,
            revenue: revenue.unwrap_or(0.0),
        })
    }

    fn get_author_sales(&self, user_id: UserId) -> RepositoryResult<Vec<AuthorBookSales>> {
        use crate::schema::{books, purchases};

        let mut conn = self.conn()?;

        let owned: Vec<(i32, String)> = books::table
            .filter(books::user_id.eq(user_id.get()))
            .select((books::id, books::title))
            .load(&mut conn)?;

        let book_ids: Vec<i32> = owned.iter().map(|(id, _)| *id).collect();
        let sold: Vec<(i32, f64)> = purchases::table
            .filter(purchases::book_id.eq_any(&book_ids))
            .select((purchases::book_id, purchases::price))
            .load(&mut conn)?;

        let mut report = owned
            .into_iter()
            .map(|(id, title)| {
                Ok(AuthorBookSales {
                    book_id: id.try_into()?,
                    title: BookTitle::new(title)?,
                    sales: BookSales::ZERO,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        for (book_id, price) in sold {
            if let Some(entry) = report.iter_mut().find(|e| e.book_id == book_id) {
                entry.sales.count += 1;
                entry.sales.revenue += price;
            }
        }

        report.sort_by(|a, b| {
            b.sales
                .revenue
                .partial_cmp(&a.sales.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(report)
    }
}

impl PurchaseWriter for DieselRepository {
    fn create_purchase(&self, purchase: &NewPurchase) -> RepositoryResult<Purchase> {
        use crate::schema::{books, purchases};

        let mut conn = self.conn()?;

        conn.transaction::<Purchase, RepositoryError, _>(|conn| {
            let already_owned = purchases::table
                .filter(purchases::user_id.eq(purchase.user_id.get()))
                .filter(purchases::book_id.eq(purchase.book_id.get()))
                .select(purchases::id)
                .first::<i32>(conn)
                .optional()?
                .is_some();
            if already_owned {
                return Err(RepositoryError::AlreadyOwned);
            }

            // Price snapshot: later edits to the book must not change the
            // recorded amount.
            let price = books::table
                .filter(books::id.eq(purchase.book_id.get()))
                .select(books::price)
                .first::<f64>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let db_purchase = DbNewPurchase {
                user_id: purchase.user_id.get(),
                book_id: purchase.book_id.get(),
                price,
                payment_method: purchase.payment_method.as_str().to_string(),
                payment_intent: purchase.payment_intent.as_str().to_string(),
                created_at: Utc::now().naive_utc(),
            };

            // The pre-check above is an optimization only. The UNIQUE
            // constraint on (user_id, book_id) is the authoritative guard:
            // a racing duplicate insert fails there and is reported as
            // AlreadyOwned, not a generic failure.
            let inserted = diesel::insert_into(purchases::table)
                .values(&db_purchase)
                .returning(DbPurchase::as_returning())
                .get_result::<DbPurchase>(conn)
                .map_err(|err| match RepositoryError::from(err) {
                    RepositoryError::Conflict(_) => RepositoryError::AlreadyOwned,
                    other => other,
                })?;

            Ok(inserted.try_into()?)
        })
    }
}
