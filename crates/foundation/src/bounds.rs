/// Inclusive longitude/latitude bounds in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    /// Full longitude range, latitudes capped at ±85°, the usable band for
    /// web-mercator style rendering.
    pub const WORLD: GeoBounds = GeoBounds {
        min_lng: -180.0,
        max_lng: 180.0,
        min_lat: -85.0,
        max_lat: 85.0,
    };

    pub fn new(min_lng: f64, max_lng: f64, min_lat: f64, max_lat: f64) -> Self {
        GeoBounds {
            min_lng,
            max_lng,
            min_lat,
            max_lat,
        }
    }

    pub fn clamp_lng(&self, lng: f64) -> f64 {
        lng.clamp(self.min_lng, self.max_lng)
    }

    pub fn clamp_lat(&self, lat: f64) -> f64 {
        lat.clamp(self.min_lat, self.max_lat)
    }

    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        lng >= self.min_lng && lng <= self.max_lng && lat >= self.min_lat && lat <= self.max_lat
    }

    pub fn is_valid(&self) -> bool {
        self.min_lng.is_finite()
            && self.max_lng.is_finite()
            && self.min_lat.is_finite()
            && self.max_lat.is_finite()
            && self.min_lng <= self.max_lng
            && self.min_lat <= self.max_lat
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        GeoBounds::WORLD
    }
}

/// Inclusive integer bounds for point values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValueBounds {
    pub min: i32,
    pub max: i32,
}

impl ValueBounds {
    pub const DEFAULT: ValueBounds = ValueBounds { min: 0, max: 100 };

    pub fn new(min: i32, max: i32) -> Self {
        ValueBounds { min, max }
    }

    /// Number of distinct values in the range. Only meaningful when
    /// `is_valid()` holds.
    pub fn span(&self) -> u64 {
        (i64::from(self.max) - i64::from(self.min) + 1) as u64
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

impl Default for ValueBounds {
    fn default() -> Self {
        ValueBounds::DEFAULT
    }
}
