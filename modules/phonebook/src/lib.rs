// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::model;

// === INTERNAL MODULES ===
pub mod api;
pub mod domain;
pub mod infra;
