pub mod json;
pub mod network;
pub mod recurrence;
pub mod svg;
pub mod triplet_file;
