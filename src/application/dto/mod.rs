pub mod avatar_dto;
