pub mod collect;
pub mod loader;
pub mod suite_model;
