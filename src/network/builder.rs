use rand::RngCore;

use crate::error::{Error, Result};
use crate::layers::{
    role_for_position, DenseLayer, InputLayer, Layer, LayerRole, OutputLayer,
};

/// One element of a layer specification: a bare node count that gets its
/// role from its position, or a pre-built layer accepted as-is.
pub enum LayerItem {
    Nodes(usize),
    Custom(Box<dyn Layer>),
}

impl From<usize> for LayerItem {
    fn from(nodes: usize) -> LayerItem {
        LayerItem::Nodes(nodes)
    }
}

impl From<InputLayer> for LayerItem {
    fn from(layer: InputLayer) -> LayerItem {
        LayerItem::Custom(Box::new(layer))
    }
}

impl From<DenseLayer> for LayerItem {
    fn from(layer: DenseLayer) -> LayerItem {
        LayerItem::Custom(Box::new(layer))
    }
}

impl From<OutputLayer> for LayerItem {
    fn from(layer: OutputLayer) -> LayerItem {
        LayerItem::Custom(Box::new(layer))
    }
}

/// Instantiates and wires the layer chain.
///
/// Node counts are turned into role-appropriate layers (input at position 0,
/// output last, hidden between); pre-built layers pass through. Each layer
/// after the first is connected to its predecessor, which fixes its weight
/// shape. A degenerate element (zero nodes) fails with `WrongLayerType`
/// naming the position.
pub(crate) fn build_layers(
    items: Vec<LayerItem>,
    rng: &mut dyn RngCore,
) -> Result<Vec<Box<dyn Layer>>> {
    if items.is_empty() {
        return Err(Error::EmptyLayerSpec);
    }

    let len = items.len();
    let mut layers: Vec<Box<dyn Layer>> = Vec::with_capacity(len);

    for (position, item) in items.into_iter().enumerate() {
        let layer: Box<dyn Layer> = match item {
            LayerItem::Nodes(0) => return Err(Error::WrongLayerType { position }),
            LayerItem::Nodes(nodes) => match role_for_position(position, len) {
                LayerRole::Input => Box::new(InputLayer::new(nodes)),
                LayerRole::Hidden => Box::new(DenseLayer::new(nodes)),
                LayerRole::Output => Box::new(OutputLayer::new(nodes)),
            },
            LayerItem::Custom(layer) if layer.node_number() == 0 => {
                return Err(Error::WrongLayerType { position })
            }
            LayerItem::Custom(layer) => layer,
        };

        layers.push(layer);

        if position == 0 {
            continue;
        }

        let (previous, current) = layers.split_at_mut(position);
        current[0].connect_to_layer(previous[position - 1].as_ref(), rng);
    }

    Ok(layers)
}
