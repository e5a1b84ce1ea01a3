//! Significance and multiple-testing helpers used by the selector stages.

pub mod binomial;
pub mod contrast;
pub mod correlation;
pub mod fdr;
pub mod normal;
