pub mod cache;
pub mod events;
pub mod session;
pub mod summary;
pub mod window;
