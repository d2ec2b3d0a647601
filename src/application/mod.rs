// Application layer - use cases over the avatar service contract
pub mod dto;
pub mod errors;
pub mod services;
