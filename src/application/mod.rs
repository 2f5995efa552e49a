// Application layer - Use cases for keeping the dashboard charts current
pub mod chart_builder;
pub mod data_source;
pub mod error;
pub mod mount_point;
pub mod refresher;
pub mod theme_controller;
