use foundation::{GeoBounds, Mulberry32, ValueBounds};

use crate::categories::CategoryRegistry;
use crate::point::SeedPoint;

/// Fixed generator seed (a date stamp) so the committed asset is
/// reproducible from source.
pub const SEED_GEN_RNG_SEED: u32 = 20_260_122;
/// Default number of seed records.
pub const SEED_POINT_COUNT: usize = 500;
/// Peak-to-peak longitude jitter around the center, in degrees.
pub const LONGITUDE_JITTER: f64 = 0.8;
/// Peak-to-peak latitude jitter around the center, in degrees.
pub const LATITUDE_JITTER: f64 = 0.6;
/// Decimal digits kept on generated coordinates.
pub const COORD_DECIMAL_DIGITS: usize = 6;
/// Default generation center (San Francisco).
pub const DEFAULT_CENTER: [f64; 2] = [-122.45, 37.78];

/// Knobs for offline seed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedGenOptions {
    pub count: usize,
    pub rng_seed: u32,
    pub center: [f64; 2],
    pub lng_jitter: f64,
    pub lat_jitter: f64,
    pub geo: GeoBounds,
    pub values: ValueBounds,
}

impl Default for SeedGenOptions {
    fn default() -> Self {
        SeedGenOptions {
            count: SEED_POINT_COUNT,
            rng_seed: SEED_GEN_RNG_SEED,
            center: DEFAULT_CENTER,
            lng_jitter: LONGITUDE_JITTER,
            lat_jitter: LATITUDE_JITTER,
            geo: GeoBounds::WORLD,
            values: ValueBounds::DEFAULT,
        }
    }
}

/// Generate a raw seed dataset: positions jittered around the center, values
/// drawn across the full range, categories cycling through the registry.
///
/// Three draws per record, in the order longitude, latitude, value.
/// Coordinates are rounded through their six-decimal string form so the
/// in-memory value is exactly what the serialized asset reparses to, then
/// clamped to the geo bounds. Every 7th record drops its id, every 9th its
/// category, every 11th its value, keeping normalization's derivation paths
/// exercised by the shipped asset.
pub fn generate_seed_points(
    registry: &CategoryRegistry,
    options: &SeedGenOptions,
) -> Vec<SeedPoint> {
    let mut rng = Mulberry32::new(options.rng_seed);
    let mut out = Vec::with_capacity(options.count);

    for i in 0..options.count {
        let category = &registry.categories()[i % registry.len()].id;

        let lng = options.center[0] + (rng.next_f64() - 0.5) * options.lng_jitter;
        let lat = options.center[1] + (rng.next_f64() - 0.5) * options.lat_jitter;
        let value = (rng.next_f64() * (f64::from(options.values.max) - f64::from(options.values.min))
            + f64::from(options.values.min))
        .round() as i32;

        let position = [
            options.geo.clamp_lng(round_to_decimals(lng, COORD_DECIMAL_DIGITS)),
            options.geo.clamp_lat(round_to_decimals(lat, COORD_DECIMAL_DIGITS)),
        ];

        let mut point = SeedPoint {
            position,
            id: Some(format!("seed_{i}")),
            value: Some(value),
            category: Some(category.to_string()),
        };
        if i % 7 == 0 {
            point.id = None;
        }
        if i % 9 == 0 {
            point.category = None;
        }
        if i % 11 == 0 {
            point.value = None;
        }
        out.push(point);
    }

    out
}

/// Round through the decimal string form rather than scaling by powers of
/// ten, so the stored float is the nearest representable of the printed
/// decimal.
fn round_to_decimals(x: f64, digits: usize) -> f64 {
    format!("{x:.digits$}").parse().unwrap_or(x)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{SeedGenOptions, generate_seed_points, round_to_decimals};
    use crate::categories::CategoryRegistry;

    const SEED_ASSET: &str = include_str!("../../apps/points_server/assets/seed-points.json");

    fn small_options() -> SeedGenOptions {
        SeedGenOptions {
            count: 12,
            ..SeedGenOptions::default()
        }
    }

    #[test]
    fn matches_committed_asset() {
        let points = generate_seed_points(&CategoryRegistry::builtin(), &small_options());
        let generated = serde_json::to_value(&points).unwrap();
        let committed: serde_json::Value = serde_json::from_str(SEED_ASSET).unwrap();
        assert_eq!(generated, committed);
    }

    #[test]
    fn generation_is_deterministic() {
        let registry = CategoryRegistry::builtin();
        let options = small_options();
        assert_eq!(
            generate_seed_points(&registry, &options),
            generate_seed_points(&registry, &options)
        );
    }

    #[test]
    fn obfuscation_pattern_is_fixed() {
        let points = generate_seed_points(&CategoryRegistry::builtin(), &small_options());
        assert_eq!(points.len(), 12);

        // Index 0 hits all three drop rules at once.
        assert!(points[0].id.is_none());
        assert!(points[0].category.is_none());
        assert!(points[0].value.is_none());

        assert!(points[7].id.is_none());
        assert!(points[7].value.is_some());
        assert!(points[9].category.is_none());
        assert!(points[9].id.is_some());
        assert!(points[11].value.is_none());
        assert!(points[11].category.is_some());

        assert_eq!(points[1].id.as_deref(), Some("seed_1"));
        assert_eq!(points[5].id.as_deref(), Some("seed_5"));
    }

    #[test]
    fn categories_cycle_through_registry() {
        let points = generate_seed_points(&CategoryRegistry::builtin(), &small_options());
        assert_eq!(points[1].category.as_deref(), Some("beta"));
        assert_eq!(points[2].category.as_deref(), Some("gamma"));
        assert_eq!(points[3].category.as_deref(), Some("delta"));
        assert_eq!(points[4].category.as_deref(), Some("epsilon"));
        assert_eq!(points[5].category.as_deref(), Some("alpha"));
        assert_eq!(points[6].category.as_deref(), Some("beta"));
    }

    #[test]
    fn positions_are_rounded_jittered_and_bounded() {
        let registry = CategoryRegistry::builtin();
        let options = SeedGenOptions {
            count: 200,
            ..SeedGenOptions::default()
        };
        let points = generate_seed_points(&registry, &options);
        for point in &points {
            let [lng, lat] = point.position;
            assert!(options.geo.contains(lng, lat));
            assert!((lng - options.center[0]).abs() <= options.lng_jitter / 2.0 + 1e-6);
            assert!((lat - options.center[1]).abs() <= options.lat_jitter / 2.0 + 1e-6);
            // Rounding through the string form is idempotent.
            assert_eq!(round_to_decimals(lng, 6), lng);
            assert_eq!(round_to_decimals(lat, 6), lat);
        }
    }

    #[test]
    fn values_cover_the_configured_range() {
        let registry = CategoryRegistry::builtin();
        let options = SeedGenOptions {
            count: 500,
            ..SeedGenOptions::default()
        };
        let points = generate_seed_points(&registry, &options);
        let values: Vec<i32> = points.iter().filter_map(|p| p.value).collect();
        assert!(!values.is_empty());
        assert!(values.iter().all(|v| (0..=100).contains(v)));
        // 500 draws across 0..=100 hit both tails in practice.
        assert!(values.iter().any(|v| *v < 10));
        assert!(values.iter().any(|v| *v > 90));
    }

    #[test]
    fn round_to_decimals_truncates_noise() {
        assert_eq!(round_to_decimals(1.123456789, 6), 1.123457);
        assert_eq!(round_to_decimals(-122.45, 6), -122.45);
        assert_eq!(round_to_decimals(0.0, 6), 0.0);
    }
}
