pub mod broker;
pub mod orders;
pub mod risk;
pub mod shapes;
