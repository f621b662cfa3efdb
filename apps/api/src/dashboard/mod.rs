pub mod form;
pub mod handlers;
pub mod screen;
pub mod store;
