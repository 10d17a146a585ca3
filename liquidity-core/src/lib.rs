pub mod book;
pub mod broker;
pub mod display;
pub mod event;
pub mod idgen;
pub mod num;
pub mod order;
pub mod provision;
pub mod risk;
pub mod side;
pub mod tracing;
pub mod types;
