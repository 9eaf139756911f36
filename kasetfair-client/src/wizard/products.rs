use shared::models::ProductSummary;
use uuid::Uuid;

use crate::api::Attachment;

const DEFAULT_PRODUCT_ROWS: usize = 3;

/// One row of the product step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub id: String,
    pub name: String,
    /// Raw input; parsed only when the catalog is submitted.
    pub price: String,
    pub file: Option<Attachment>,
    pub file_name: Option<String>,
}

impl ProductDraft {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            price: String::new(),
            file: None,
            file_name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Price,
}

/// Product rows; never fewer than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductsDraft {
    rows: Vec<ProductDraft>,
}

impl Default for ProductsDraft {
    fn default() -> Self {
        Self {
            rows: (0..DEFAULT_PRODUCT_ROWS).map(|_| ProductDraft::empty()).collect(),
        }
    }
}

impl ProductsDraft {
    /// Rows reported by the server; an empty list gives the default blank rows.
    #[must_use]
    pub fn from_snapshot(products: &[ProductSummary]) -> Self {
        if products.is_empty() {
            return Self::default();
        }
        let rows = products
            .iter()
            .enumerate()
            .map(|(index, product)| ProductDraft {
                id: product
                    .id
                    .as_ref()
                    .map_or_else(|| format!("server-{index}"), ToString::to_string),
                name: product.name.clone().unwrap_or_default(),
                price: product
                    .price
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                file: None,
                file_name: product.display_file_name().map(str::to_string),
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[ProductDraft] {
        &self.rows
    }

    /// Returns `false` when no row has that id.
    pub fn update(&mut self, id: &str, field: ProductField, value: impl Into<String>) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            return false;
        };
        match field {
            ProductField::Name => row.name = value.into(),
            ProductField::Price => row.price = value.into(),
        }
        true
    }

    pub fn attach(&mut self, id: &str, file: Option<Attachment>) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            return false;
        };
        row.file_name = file.as_ref().map(|file| file.file_name.clone());
        row.file = file;
        true
    }

    /// Appends a blank row and returns its id.
    pub fn add(&mut self) -> String {
        let row = ProductDraft::empty();
        let id = row.id.clone();
        self.rows.push(row);
        id
    }

    /// Removes a row unless it is the last one.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.rows.len() == 1 {
            return false;
        }
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    /// Rows with something typed into them.
    pub fn filled(&self) -> impl Iterator<Item = &ProductDraft> {
        self.rows
            .iter()
            .filter(|row| !row.name.trim().is_empty() || !row.price.trim().is_empty())
    }
}
