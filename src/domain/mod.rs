// Domain layer: core models and ports (interfaces). No timing logic here.

pub mod model;
pub mod ports;
