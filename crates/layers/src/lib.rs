pub mod filter;
pub mod layer;
pub mod points;

pub use filter::*;
pub use layer::*;
pub use points::*;
