// Admin tips dashboard: live chart refresher, theme preferences and widgets
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
