// Domain layer: wire models, element layout and ports (interfaces).

pub mod model;
pub mod ports;
