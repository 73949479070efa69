pub mod cleaner;
pub mod loader;
pub mod types;
pub mod utils;
