use std::fmt;

use foundation::{GeoBounds, Mulberry32, ValueBounds};

use crate::point::{Point, PointCollection, ValueDomain};

/// Fixed expansion seed so every session sees the same expanded dataset.
pub const EXPANSION_RNG_SEED: u32 = 1337;
/// Peak-to-peak positional jitter in degrees; max offset per axis is half.
pub const JITTER_SPAN_DEGREES: f64 = 0.05;
/// Maximum absolute integer drift applied to a base value.
pub const VALUE_DRIFT_MAX_ABS: i32 = 14;
/// Default expanded dataset size.
pub const TARGET_POINT_COUNT: usize = 250_000;

/// Knobs for deterministic point expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandOptions {
    pub target_count: usize,
    pub rng_seed: u32,
    pub jitter_span_degrees: f64,
    pub value_drift_max_abs: i32,
    pub geo: GeoBounds,
    pub values: ValueBounds,
}

impl ExpandOptions {
    pub fn new(target_count: usize) -> Self {
        ExpandOptions {
            target_count,
            rng_seed: EXPANSION_RNG_SEED,
            jitter_span_degrees: JITTER_SPAN_DEGREES,
            value_drift_max_abs: VALUE_DRIFT_MAX_ABS,
            geo: GeoBounds::WORLD,
            values: ValueBounds::DEFAULT,
        }
    }

    fn validate(&self) -> Result<(), ExpandError> {
        if self.target_count == 0 {
            return Err(ExpandError::ZeroTargetCount);
        }
        if !self.jitter_span_degrees.is_finite() || self.jitter_span_degrees < 0.0 {
            return Err(ExpandError::InvalidOptions {
                reason: format!(
                    "jitter span must be finite and non-negative, got {}",
                    self.jitter_span_degrees
                ),
            });
        }
        if self.value_drift_max_abs < 0 {
            return Err(ExpandError::InvalidOptions {
                reason: format!(
                    "value drift bound must be non-negative, got {}",
                    self.value_drift_max_abs
                ),
            });
        }
        if !self.geo.is_valid() {
            return Err(ExpandError::InvalidOptions {
                reason: "geo bounds are inverted or non-finite".to_string(),
            });
        }
        if !self.values.is_valid() {
            return Err(ExpandError::InvalidOptions {
                reason: "value bounds are inverted".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ExpandOptions {
    fn default() -> Self {
        ExpandOptions::new(TARGET_POINT_COUNT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    EmptySeed,
    ZeroTargetCount,
    InvalidOptions { reason: String },
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandError::EmptySeed => write!(f, "seed set must not be empty"),
            ExpandError::ZeroTargetCount => write!(f, "target count must be positive"),
            ExpandError::InvalidOptions { reason } => {
                write!(f, "invalid expansion options: {reason}")
            }
        }
    }
}

impl std::error::Error for ExpandError {}

/// Deterministically amplify a normalized seed set to `target_count` points.
///
/// One PRNG seeded from `options.rng_seed` is consumed sequentially: exactly
/// three draws per output point, in the order longitude jitter, latitude
/// jitter, value drift. Output point `i` therefore depends only on the seed,
/// the options, and `i`. Base points are reused cyclically; the output id
/// appends the output index to the base id, which keeps ids unique even
/// though base points repeat. The running value min/max is returned as the
/// collection's value domain.
pub fn expand_points(
    seed: &[Point],
    options: &ExpandOptions,
) -> Result<PointCollection, ExpandError> {
    if seed.is_empty() {
        return Err(ExpandError::EmptySeed);
    }
    options.validate()?;

    let mut rng = Mulberry32::new(options.rng_seed);
    let mut items = Vec::with_capacity(options.target_count);
    let mut min_value = i32::MAX;
    let mut max_value = i32::MIN;

    for i in 0..options.target_count {
        let base = &seed[i % seed.len()];

        let jitter_lng = (rng.next_f64() - 0.5) * options.jitter_span_degrees;
        let jitter_lat = (rng.next_f64() - 0.5) * options.jitter_span_degrees;
        let lng = options.geo.clamp_lng(base.position[0] + jitter_lng);
        let lat = options.geo.clamp_lat(base.position[1] + jitter_lat);

        let drift = ((rng.next_f64() * 2.0 - 1.0) * f64::from(options.value_drift_max_abs))
            .round() as i32;
        let value = options.values.clamp(base.value.saturating_add(drift));

        min_value = min_value.min(value);
        max_value = max_value.max(value);

        items.push(Point {
            id: format!("{}_{i}", base.id),
            position: [lng, lat],
            value,
            category: base.category.clone(),
        });
    }

    Ok(PointCollection {
        items,
        value_domain: ValueDomain {
            min: min_value,
            max: max_value,
        },
    })
}

#[cfg(test)]
mod tests {
    use foundation::{GeoBounds, ValueBounds};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{ExpandError, ExpandOptions, expand_points};
    use crate::categories::{Category, CategoryRegistry};
    use crate::normalize::{normalize_seed_points, normalize_seed_points_str};
    use crate::point::{Point, ValueDomain};

    const SEED_ASSET: &str = include_str!("../../apps/points_server/assets/seed-points.json");

    fn single_alpha_seed() -> Vec<Point> {
        let registry =
            CategoryRegistry::new(vec![Category::new("alpha", "Alpha", [255, 99, 132])]).unwrap();
        let raw = json!([{ "position": [1, 2] }]);
        normalize_seed_points(&raw, &registry, ValueBounds::DEFAULT).unwrap()
    }

    #[test]
    fn expands_single_seed_to_known_points() {
        let seed = single_alpha_seed();
        assert_eq!(seed[0].id, "pt_0_cbfb954b");
        assert_eq!(seed[0].value, 88);

        let out = expand_points(&seed, &ExpandOptions::new(3)).unwrap();
        assert_eq!(out.items.len(), 3);

        let ids: Vec<&str> = out.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["pt_0_cbfb954b_0", "pt_0_cbfb954b_1", "pt_0_cbfb954b_2"]);

        assert_eq!(out.items[0].position, [0.9842205916298553, 1.9844994625658727]);
        assert_eq!(out.items[0].value, 97);
        assert_eq!(out.items[1].position, [1.007187441107817, 1.996538730780594]);
        assert_eq!(out.items[1].value, 85);
        assert_eq!(out.items[2].position, [1.0013281324412673, 2.0024293186026627]);
        assert_eq!(out.items[2].value, 89);

        assert_eq!(out.value_domain, ValueDomain { min: 85, max: 97 });

        for point in &out.items {
            assert_eq!(point.category, "alpha");
            assert!((point.lng() - 1.0).abs() <= 0.025);
            assert!((point.lat() - 2.0).abs() <= 0.025);
        }
    }

    #[test]
    fn expansion_is_deterministic() {
        let registry = CategoryRegistry::builtin();
        let seed = normalize_seed_points_str(SEED_ASSET, &registry, ValueBounds::DEFAULT).unwrap();
        let a = expand_points(&seed, &ExpandOptions::new(1_000)).unwrap();
        let b = expand_points(&seed, &ExpandOptions::new(1_000)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_rng_seed_changes_output() {
        let seed = single_alpha_seed();
        let a = expand_points(&seed, &ExpandOptions::new(10)).unwrap();
        let mut options = ExpandOptions::new(10);
        options.rng_seed = 7;
        let b = expand_points(&seed, &options).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn output_length_is_exactly_target() {
        let registry = CategoryRegistry::builtin();
        let seed = normalize_seed_points_str(SEED_ASSET, &registry, ValueBounds::DEFAULT).unwrap();
        assert_eq!(seed.len(), 12);

        // Fewer outputs than seeds, more outputs than seeds, exact multiple.
        for target in [5, 12, 29, 120] {
            let out = expand_points(&seed, &ExpandOptions::new(target)).unwrap();
            assert_eq!(out.items.len(), target);
        }
    }

    #[test]
    fn bases_are_reused_cyclically() {
        let registry = CategoryRegistry::builtin();
        let raw = json!([
            { "position": [0, 0], "id": "a", "value": 50, "category": "alpha" },
            { "position": [10, 10], "id": "b", "value": 50, "category": "beta" },
        ]);
        let seed = normalize_seed_points(&raw, &registry, ValueBounds::DEFAULT).unwrap();
        let out = expand_points(&seed, &ExpandOptions::new(5)).unwrap();

        let ids: Vec<&str> = out.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a_0", "b_1", "a_2", "b_3", "a_4"]);
        let categories: Vec<&str> =
            out.items.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(categories, ["alpha", "beta", "alpha", "beta", "alpha"]);
    }

    #[test]
    fn output_respects_bounds_and_domain() {
        let registry = CategoryRegistry::builtin();
        let seed = normalize_seed_points_str(SEED_ASSET, &registry, ValueBounds::DEFAULT).unwrap();
        let options = ExpandOptions::new(1_000);
        let out = expand_points(&seed, &options).unwrap();

        let mut min = i32::MAX;
        let mut max = i32::MIN;
        for point in &out.items {
            assert!(options.geo.contains(point.lng(), point.lat()));
            assert!((options.values.min..=options.values.max).contains(&point.value));
            min = min.min(point.value);
            max = max.max(point.value);
        }
        assert_eq!(out.value_domain, ValueDomain { min, max });
        assert!(out.value_domain.min <= out.value_domain.max);
    }

    #[test]
    fn jitter_stays_within_half_span() {
        let seed = single_alpha_seed();
        let mut options = ExpandOptions::new(500);
        options.jitter_span_degrees = 0.2;
        let out = expand_points(&seed, &options).unwrap();
        for point in &out.items {
            assert!((point.lng() - 1.0).abs() <= 0.1);
            assert!((point.lat() - 2.0).abs() <= 0.1);
        }
    }

    #[test]
    fn zero_jitter_pins_positions_to_base() {
        let seed = single_alpha_seed();
        let mut options = ExpandOptions::new(8);
        options.jitter_span_degrees = 0.0;
        let out = expand_points(&seed, &options).unwrap();
        for point in &out.items {
            assert_eq!(point.position, [1.0, 2.0]);
        }
    }

    #[test]
    fn positions_are_clamped_to_geo_bounds() {
        let registry = CategoryRegistry::builtin();
        let raw = json!([{ "position": [-180, 85], "value": 50 }]);
        let seed = normalize_seed_points(&raw, &registry, ValueBounds::DEFAULT).unwrap();
        let out = expand_points(&seed, &ExpandOptions::new(100)).unwrap();
        for point in &out.items {
            assert!(GeoBounds::WORLD.contains(point.lng(), point.lat()));
        }
    }

    #[test]
    fn values_are_clamped_to_value_bounds() {
        let registry = CategoryRegistry::builtin();
        let raw = json!([
            { "position": [0, 0], "value": 0 },
            { "position": [1, 1], "value": 100 },
        ]);
        let seed = normalize_seed_points(&raw, &registry, ValueBounds::DEFAULT).unwrap();
        let out = expand_points(&seed, &ExpandOptions::new(200)).unwrap();
        for point in &out.items {
            assert!((0..=100).contains(&point.value));
        }
        assert!(out.value_domain.min >= 0);
        assert!(out.value_domain.max <= 100);
    }

    #[test]
    fn empty_seed_is_rejected() {
        let err = expand_points(&[], &ExpandOptions::new(10)).unwrap_err();
        assert_eq!(err, ExpandError::EmptySeed);
    }

    #[test]
    fn zero_target_is_rejected() {
        let seed = single_alpha_seed();
        let err = expand_points(&seed, &ExpandOptions::new(0)).unwrap_err();
        assert_eq!(err, ExpandError::ZeroTargetCount);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let seed = single_alpha_seed();

        let mut options = ExpandOptions::new(10);
        options.jitter_span_degrees = -0.5;
        assert!(matches!(
            expand_points(&seed, &options).unwrap_err(),
            ExpandError::InvalidOptions { .. }
        ));

        let mut options = ExpandOptions::new(10);
        options.value_drift_max_abs = -1;
        assert!(matches!(
            expand_points(&seed, &options).unwrap_err(),
            ExpandError::InvalidOptions { .. }
        ));

        let mut options = ExpandOptions::new(10);
        options.values = ValueBounds::new(10, 0);
        assert!(matches!(
            expand_points(&seed, &options).unwrap_err(),
            ExpandError::InvalidOptions { .. }
        ));
    }
}
