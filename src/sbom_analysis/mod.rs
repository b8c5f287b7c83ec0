//! Domain layer - document model, format parsers and pure analysis services
pub mod domain;
pub mod parsers;
pub mod policies;
pub mod services;
