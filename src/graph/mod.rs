pub mod model;

pub use model::{Edge, Graph, NodeId};
