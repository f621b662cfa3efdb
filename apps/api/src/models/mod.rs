pub mod application;
pub mod notice;
pub mod user;
