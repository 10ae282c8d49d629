pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod gamification;
pub mod handlers;
pub mod middleware;
pub mod services;
