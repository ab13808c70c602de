pub mod actuator;
pub mod principal;
