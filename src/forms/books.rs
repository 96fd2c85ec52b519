use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::book::{NewBook, UpdateBook};
use crate::domain::types::{
    AuthorName, BookPrice, BookTitle, BookType, CategoryName, TypeConstraintError, UserId,
};

/// Trim and de-duplicate raw category names, preserving submission order.
/// Comparison is case-sensitive.
fn normalize_categories(raw: Vec<String>) -> Result<Vec<CategoryName>, TypeConstraintError> {
    let mut seen = Vec::new();
    for name in raw {
        let name = CategoryName::new(name)?;
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    Ok(seen)
}

/// Raw book-creation fields as submitted by the API client.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub book_type: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub cover_url: Option<String>,
    pub file_url: Option<String>,
    pub sample_url: Option<String>,
    pub audio_url: Option<String>,
}

/// Validated, typed form of [`CreateBookForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBookFormPayload {
    pub title: BookTitle,
    pub author: AuthorName,
    pub description: Option<String>,
    pub price: BookPrice,
    pub book_type: BookType,
    pub categories: Vec<CategoryName>,
    pub cover_url: Option<String>,
    pub file_url: Option<String>,
    pub sample_url: Option<String>,
    pub audio_url: Option<String>,
}

impl CreateBookFormPayload {
    pub fn into_new_book(self, user_id: UserId) -> NewBook {
        let now = Utc::now().naive_utc();
        NewBook {
            user_id,
            title: self.title,
            author: self.author,
            description: self.description,
            price: self.price,
            book_type: self.book_type,
            cover_url: self.cover_url,
            file_url: self.file_url,
            sample_url: self.sample_url,
            audio_url: self.audio_url,
            categories: self.categories,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateBookFormError {
    #[error("Create book form validation failed: {0}")]
    Validation(String),
    #[error("Create book form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateBookFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateBookFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateBookForm> for CreateBookFormPayload {
    type Error = CreateBookFormError;

    fn try_from(value: CreateBookForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: BookTitle::new(value.title)?,
            author: AuthorName::new(value.author)?,
            description: value.description,
            price: BookPrice::new(value.price)?,
            book_type: BookType::try_from(value.book_type)?,
            categories: normalize_categories(value.categories)?,
            cover_url: value.cover_url,
            file_url: value.file_url,
            sample_url: value.sample_url,
            audio_url: value.audio_url,
        })
    }
}

/// Raw book-update fields. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookForm {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub author: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

/// Validated, typed form of [`UpdateBookForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBookFormPayload {
    pub changes: UpdateBook,
}

#[derive(Debug, Error)]
pub enum UpdateBookFormError {
    #[error("Update book form validation failed: {0}")]
    Validation(String),
    #[error("Update book form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateBookFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateBookFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateBookForm> for UpdateBookFormPayload {
    type Error = UpdateBookFormError;

    fn try_from(value: UpdateBookForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            changes: UpdateBook {
                title: value.title.map(BookTitle::new).transpose()?,
                author: value.author.map(AuthorName::new).transpose()?,
                description: value.description,
                price: value.price.map(BookPrice::new).transpose()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> CreateBookForm {
        CreateBookForm {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: None,
            price: 9.99,
            book_type: "ebook".to_string(),
            categories: vec![],
            cover_url: None,
            file_url: None,
            sample_url: None,
            audio_url: None,
        }
    }

    #[test]
    fn create_book_deduplicates_categories() {
        let mut form = base_form();
        form.categories = vec![
            " Sci-Fi ".to_string(),
            "Classics".to_string(),
            "Sci-Fi".to_string(),
        ];

        let payload: CreateBookFormPayload = form.try_into().unwrap();
        assert_eq!(payload.categories.len(), 2);
        assert_eq!(payload.categories[0], "Sci-Fi");
        assert_eq!(payload.categories[1], "Classics");
    }

    #[test]
    fn create_book_keeps_distinct_cases() {
        let mut form = base_form();
        form.categories = vec!["sci-fi".to_string(), "Sci-Fi".to_string()];

        let payload: CreateBookFormPayload = form.try_into().unwrap();
        assert_eq!(payload.categories.len(), 2);
    }

    #[test]
    fn create_book_rejects_negative_price() {
        let mut form = base_form();
        form.price = -1.0;

        let err = CreateBookFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, CreateBookFormError::Validation(_)));
    }

    #[test]
    fn create_book_rejects_unknown_type() {
        let mut form = base_form();
        form.book_type = "hardcover".to_string();

        let err = CreateBookFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, CreateBookFormError::TypeConstraint(_)));
    }

    #[test]
    fn update_book_allows_partial_changes() {
        let form = UpdateBookForm {
            title: None,
            author: None,
            description: None,
            price: Some(14.99),
        };

        let payload: UpdateBookFormPayload = form.try_into().unwrap();
        assert!(payload.changes.title.is_none());
        assert_eq!(payload.changes.price.unwrap().get(), 14.99);
    }
}
