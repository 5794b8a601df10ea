// Domain layer: plan records, requests/results and the ports the rest of the crate plugs into.

pub mod model;
pub mod ports;
