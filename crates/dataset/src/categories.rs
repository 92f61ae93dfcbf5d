use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::point::CategoryId;

/// A renderable point category: stable id, display label, RGB swatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
    pub color: [u8; 3],
}

impl Category {
    pub fn new(id: impl Into<Arc<str>>, label: impl Into<String>, color: [u8; 3]) -> Self {
        Category {
            id: CategoryId::new(id),
            label: label.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    Empty,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Empty => write!(f, "category registry must contain at least one entry"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Ordered, non-empty set of categories.
///
/// Non-emptiness is enforced at construction so normalization, expansion,
/// and seed generation can index `hash % len` without re-checking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new(categories: Vec<Category>) -> Result<Self, RegistryError> {
        if categories.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(CategoryRegistry { categories })
    }

    /// The built-in category set. Adding an entry here is all it takes; the
    /// rest of the pipeline (derivation, colors, initial filters) picks the
    /// registry up by length and order.
    pub fn builtin() -> Self {
        CategoryRegistry {
            categories: vec![
                Category::new("alpha", "Alpha", [255, 99, 132]),
                Category::new("beta", "Beta", [54, 162, 235]),
                Category::new("gamma", "Gamma", [255, 206, 86]),
                Category::new("delta", "Delta", [75, 192, 192]),
                Category::new("epsilon", "Epsilon", [153, 102, 255]),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn by_id(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == *id)
    }

    /// Map a raw category string onto the registry's shared id where known,
    /// avoiding a fresh allocation for every point of a common category.
    pub fn intern(&self, id: &str) -> CategoryId {
        match self.by_id(id) {
            Some(category) => category.id.clone(),
            None => CategoryId::from(id),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &CategoryId> {
        self.categories.iter().map(|c| &c.id)
    }
}
