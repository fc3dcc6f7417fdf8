//! Stack source adapters.

mod memory;
mod yaml;

pub use memory::StaticStackSource;
pub use yaml::YamlStackSource;
