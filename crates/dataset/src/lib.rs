//! Deterministic point dataset: seed generation, normalization, and
//! expansion into the collection the render layers consume.
//!
//! Everything here is reproducible by construction. Randomness comes only
//! from seeded [`foundation::Mulberry32`] streams and derivation only from
//! [`foundation::fnv1a_32`] over a record's coordinate key, so the same
//! inputs produce byte-identical datasets across runs and machines.

pub mod categories;
pub mod expand;
pub mod generate;
pub mod normalize;
pub mod point;

pub use categories::*;
pub use expand::*;
pub use generate::*;
pub use normalize::*;
pub use point::*;
