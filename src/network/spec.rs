use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::layers::{
    role_for_position, ConnectionType, DenseLayer, Init, InputLayer, LayerRole, OutputLayer,
};
use crate::network::builder::LayerItem;
use crate::network::network::{LoggingLevel, Network};

/// Describes one layer in a network specification.
///
/// Fields:
/// - `nodes`      — number of nodes in this layer
/// - `activation` — activation applied after the linear transform
/// - `init`       — weight initialization strategy
/// - `connection` — wiring policy; only meaningful on the last entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerEntry {
    pub nodes: usize,
    #[serde(default)]
    pub activation: ActivationFunction,
    #[serde(default)]
    pub init: Init,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionType>,
}

/// A fully serializable description of a network architecture plus its
/// logging level.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of any
/// trained weights, making it possible to store architecture configurations
/// before training starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the spec file stem.
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerEntry>,
    /// Logging level the built network starts with.
    #[serde(default)]
    pub logging: LoggingLevel,
}

impl NetworkSpec {
    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file, validating each layer
    /// element positionally.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let value: Value = serde_json::from_reader(reader)?;
        NetworkSpec::from_value(&value)
    }

    /// Builds a spec from a parsed JSON value.
    ///
    /// Every element of the `layers` array must be a positive integer (a
    /// bare node count) or a layer object; anything else fails with
    /// `WrongLayerType` naming the offending position.
    pub fn from_value(value: &Value) -> Result<NetworkSpec> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("network")
            .to_owned();

        let logging = match value.get("logging") {
            Some(level) => serde_json::from_value(level.clone())?,
            None => LoggingLevel::default(),
        };

        let raw = value
            .get("layers")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        if raw.is_empty() {
            return Err(Error::EmptyLayerSpec);
        }

        let mut layers = Vec::with_capacity(raw.len());
        for (position, item) in raw.iter().enumerate() {
            let entry = match item {
                Value::Number(n) => match n.as_u64() {
                    Some(nodes) if nodes > 0 => LayerEntry {
                        nodes: nodes as usize,
                        ..LayerEntry::default()
                    },
                    _ => return Err(Error::WrongLayerType { position }),
                },
                Value::Object(_) => {
                    let entry: LayerEntry = serde_json::from_value(item.clone())?;
                    if entry.nodes == 0 {
                        return Err(Error::WrongLayerType { position });
                    }
                    entry
                }
                _ => return Err(Error::WrongLayerType { position }),
            };
            layers.push(entry);
        }

        Ok(NetworkSpec {
            name,
            layers,
            logging,
        })
    }

    /// Instantiates the described network.
    pub fn build(&self) -> Result<Network> {
        Network::build(self.items(), self.logging)
    }

    /// Instantiates the described network with deterministic weights.
    pub fn build_with_seed(&self, seed: u64) -> Result<Network> {
        Network::build_with_seed(self.items(), self.logging, seed)
    }

    fn items(&self) -> Vec<LayerItem> {
        let len = self.layers.len();
        self.layers
            .iter()
            .enumerate()
            .map(|(position, entry)| match role_for_position(position, len) {
                LayerRole::Input => LayerItem::from(InputLayer::new(entry.nodes)),
                LayerRole::Hidden => LayerItem::from(
                    DenseLayer::new(entry.nodes)
                        .with_activation(entry.activation)
                        .with_init(entry.init),
                ),
                LayerRole::Output => {
                    let mut layer = OutputLayer::new(entry.nodes)
                        .with_activation(entry.activation)
                        .with_init(entry.init);
                    if let Some(connection) = entry.connection {
                        layer = layer.with_connection(connection);
                    }
                    LayerItem::from(layer)
                }
            })
            .collect()
    }
}
