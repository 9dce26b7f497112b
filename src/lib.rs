pub mod cache;
pub mod catalog;
pub mod config;
pub mod models;
pub mod report;
pub mod repository;
pub mod summary;
