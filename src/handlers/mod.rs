pub mod auth;
pub mod calendar;
pub mod chat;
pub mod entries;
pub mod health;
pub mod moods;
pub mod reflections;
