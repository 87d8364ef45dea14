pub mod chat;
pub mod entry;
pub mod mood;
pub mod reflection;
pub mod user;
