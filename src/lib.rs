pub mod config;
pub mod constants;
pub mod database;
pub mod expenses;
pub mod models;
pub mod repository;
pub mod utils;
