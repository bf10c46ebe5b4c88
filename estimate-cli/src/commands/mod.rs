//! Command implementations, one module per command family.

pub mod company;
pub mod estimate;
pub mod saved;
pub mod settings;
pub mod transfer;
