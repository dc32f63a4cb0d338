pub mod calendar;
pub mod chart;
pub mod customer_table;
pub mod quick_actions;
pub mod recent_activity;
pub mod sidebar;
pub mod stats_card;
