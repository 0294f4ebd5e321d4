mod reproject;

pub use reproject::{reproject_if_needed, AffineReprojection, Reproject};
