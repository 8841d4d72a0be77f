pub mod magnet;
pub mod title;
