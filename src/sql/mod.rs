//! Safe SQL builder: identifiers from a fixed column list only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
