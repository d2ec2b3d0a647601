pub mod avatar_repository;
