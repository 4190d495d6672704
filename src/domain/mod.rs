// Domain layer: message model and the node/host ports. No CSV specifics here.

pub mod model;
pub mod ports;
