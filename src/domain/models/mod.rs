pub mod avatar;
pub mod link;
pub mod user;
