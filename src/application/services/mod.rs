pub mod avatar_service;
