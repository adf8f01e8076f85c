pub mod app_config;
pub mod unit_price;
