// Domain types and value objects
pub mod cycle;
pub mod pivot;
pub mod series;

// Re-export commonly used types
pub use cycle::CycleSnapshot;
pub use pivot::{PivotEvent, PivotPolarity};
pub use series::BarSeries;
