pub mod payment;
pub mod plan;
pub mod ports;
