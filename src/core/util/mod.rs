pub mod cost_util;
pub mod time_util;
