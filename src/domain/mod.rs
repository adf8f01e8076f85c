pub mod collect;
pub mod context;
pub mod cost;
pub mod render;
pub mod setup;
