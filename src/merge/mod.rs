pub mod aggregate;
pub mod options;
pub mod span;
pub mod stats;
