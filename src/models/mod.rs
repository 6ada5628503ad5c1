// Module exports for models

pub mod category;
pub mod child;
pub mod clock;
pub mod config;
pub mod day;
pub mod event;
pub mod school_time;
pub mod template;
pub mod validation;
pub mod viewport;
