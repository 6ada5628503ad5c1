// Service module exports

pub mod config;
pub mod database;
pub mod export;
pub mod layout;
pub mod overlap;
pub mod profile;
pub mod schedule;
pub mod store;
pub mod template;
