pub mod api;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod search_cache;
pub mod session;
pub mod showcase;
