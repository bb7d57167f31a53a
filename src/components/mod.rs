pub mod auth;
pub mod customer_table;
pub mod dashboard;
pub mod error_banner;
pub mod forms;
pub mod session_view;
