pub mod maths_utils;

pub use maths_utils::TrendFit;
