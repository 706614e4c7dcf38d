// Domain layer: record schema, snapshot and ports. No I/O here.

pub mod model;
pub mod ports;
