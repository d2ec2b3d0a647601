// Domain layer - avatar entities and the avatar service contract
pub mod errors;
pub mod models;
pub mod repositories;
