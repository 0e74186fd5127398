pub mod dense;
pub mod input;
pub mod layer;
pub mod output;
pub mod role;

pub use dense::{DenseLayer, Init};
pub use input::InputLayer;
pub use layer::Layer;
pub use output::{ConnectionType, OutputLayer};
pub use role::{role_for_position, LayerRole};
