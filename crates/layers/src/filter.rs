use dataset::CategoryId;

/// User-selected filter parameters: an inclusive value range plus the set of
/// categories left visible. Transient UI-side state; owns nothing of the
/// dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub value_min: f64,
    pub value_max: f64,
    pub selected_category_ids: Vec<CategoryId>,
}

/// Receiver of GPU filter parameters.
///
/// Implemented by the concrete rendering adapter; the applicator is the sole
/// writer. The slices are valid for the duration of the call only, so
/// adapters that retain the parameters copy them out.
pub trait FilterPropsSink {
    fn apply_filter_props(&mut self, filter_range: &[f64; 2], filter_categories: &[CategoryId]);
}

/// Pushes filter parameters to a sink through alternating buffer pairs.
///
/// Downstream change detection compares the incoming reference against the
/// previous one, so handing out the same buffer twice in a row would read as
/// "no change" even after an in-place rewrite. Flipping between exactly two
/// long-lived pairs keeps each call's references distinct from the previous
/// call's without allocating per interaction; the third call reuses the
/// first call's buffers. One applicator per layer, and at most one update in
/// flight before the sink diffs it.
#[derive(Debug, Default)]
pub struct FilterApplicator {
    ranges: [[f64; 2]; 2],
    categories: [Vec<CategoryId>; 2],
    flip: usize,
}

impl FilterApplicator {
    pub fn new() -> Self {
        FilterApplicator::default()
    }

    /// Pre-sizes both category buffers so later applies never grow them.
    pub fn with_category_capacity(max_categories: usize) -> Self {
        FilterApplicator {
            ranges: [[0.0; 2]; 2],
            categories: [
                Vec::with_capacity(max_categories),
                Vec::with_capacity(max_categories),
            ],
            flip: 0,
        }
    }

    /// Rewrite the inactive buffer pair from `state` and hand it to the sink.
    ///
    /// Mutates only the applicator's own buffers; the dataset and the sink's
    /// identity are untouched.
    pub fn apply<S: FilterPropsSink>(&mut self, sink: &mut S, state: &FilterState) {
        self.flip ^= 1;
        let current = self.flip;

        self.ranges[current] = [state.value_min, state.value_max];

        let categories = &mut self.categories[current];
        categories.clear();
        categories.extend_from_slice(&state.selected_category_ids);

        sink.apply_filter_props(&self.ranges[current], &self.categories[current]);
    }
}
