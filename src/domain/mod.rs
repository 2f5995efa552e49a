// Domain layer - Dashboard data, chart and theme models
pub mod chart;
pub mod ledger;
pub mod money;
pub mod payload;
pub mod rating;
pub mod theme;
