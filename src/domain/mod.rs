// Domain layer: check results, contract constants and the reporting port.

pub mod model;
pub mod ports;
