pub mod category;
pub mod coefficients;
pub mod counts;
pub mod gene;
pub mod triplet;
