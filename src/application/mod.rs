//! Application layer orchestrating the payment flow over the domain ports.

pub mod flow;
