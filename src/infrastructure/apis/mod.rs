pub mod http_avatar_repository;
