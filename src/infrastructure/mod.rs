// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_source;
pub mod ledger_source;
pub mod preference_store;
