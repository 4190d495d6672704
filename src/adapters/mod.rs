// Adapters layer: concrete hosts the node can run under.

pub mod host;
