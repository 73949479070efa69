pub mod excel;
pub mod renderer;
pub mod report;
pub mod selector;
pub mod stats;
