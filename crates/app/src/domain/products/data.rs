//! Products Data

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use smallvec::SmallVec;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub photo: String,
}

/// Product form as filled in by the user; any field may still be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub photo: Option<String>,
}

/// A draft field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    /// Title is empty or blank.
    Title,

    /// Price is missing or not positive.
    Price,

    /// No photo has been captured.
    Photo,
}

impl Display for ProductField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Photo => "photo",
        })
    }
}

/// Draft rejected, listing every invalid field in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    fields: SmallVec<[ProductField; 3]>,
}

impl ValidationError {
    /// Invalid fields.
    #[must_use]
    pub fn fields(&self) -> &[ProductField] {
        &self.fields
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("invalid product fields:")?;

        for field in &self.fields {
            write!(f, " {field}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ProductDraft {
    /// Check required fields and turn the draft into product data.
    ///
    /// # Errors
    ///
    /// Returns every field that is missing or invalid.
    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        let mut fields = SmallVec::new();

        if self.title.trim().is_empty() {
            fields.push(ProductField::Title);
        }

        let price = self.price.filter(|price| *price > Decimal::ZERO);

        if price.is_none() {
            fields.push(ProductField::Price);
        }

        let photo = self.photo.filter(|photo| !photo.is_empty());

        if photo.is_none() {
            fields.push(ProductField::Photo);
        }

        match (price, photo) {
            (Some(price), Some(photo)) if fields.is_empty() => Ok(NewProduct {
                title: self.title,
                description: self.description,
                price,
                photo,
            }),
            _ => Err(ValidationError { fields }),
        }
    }
}
