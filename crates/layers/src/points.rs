use dataset::{CategoryId, CategoryRegistry};
use foundation::ValueBounds;

use crate::filter::FilterPropsSink;
use crate::layer::{Layer, LayerId};

/// Reference render-layer adapter for the point dataset.
///
/// Holds the two filter properties the applicator writes, starting wide
/// open: full value range, every registry category visible. A rendering
/// integration wraps its engine handle in the same shape.
#[derive(Debug)]
pub struct PointsLayer {
    id: LayerId,
    filter_range: [f64; 2],
    filter_categories: Vec<CategoryId>,
}

impl PointsLayer {
    pub fn new(id: u64, registry: &CategoryRegistry, values: ValueBounds) -> Self {
        PointsLayer {
            id: LayerId(id),
            filter_range: [f64::from(values.min), f64::from(values.max)],
            filter_categories: registry.ids().cloned().collect(),
        }
    }

    pub fn filter_range(&self) -> [f64; 2] {
        self.filter_range
    }

    pub fn filter_categories(&self) -> &[CategoryId] {
        &self.filter_categories
    }
}

impl Layer for PointsLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}

impl FilterPropsSink for PointsLayer {
    fn apply_filter_props(&mut self, filter_range: &[f64; 2], filter_categories: &[CategoryId]) {
        self.filter_range = *filter_range;
        self.filter_categories.clear();
        self.filter_categories.extend_from_slice(filter_categories);
    }
}
