pub mod cost_collect_service;
