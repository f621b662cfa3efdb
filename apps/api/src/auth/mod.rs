pub mod handlers;
pub mod provider;
pub mod screen;
pub mod session;
