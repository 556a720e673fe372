pub mod config;
pub mod handlers;
pub mod models;
pub mod sanitizer;
pub mod services;
pub mod startup;
