use serde::{Deserializer, Deserialize, Serialize, Serializer};

/// Role of an edge node in the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Sensor,
    Actuator,
    Controller,
}

impl NodeType {
    pub fn code(&self) -> i32 {
        match self {
            Self::Sensor => 1,
            Self::Actuator => 2,
            Self::Controller => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Sensor),
            2 => Some(Self::Actuator),
            3 => Some(Self::Controller),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Actuator => "actuator",
            Self::Controller => "controller",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

/// Unknown codes decode as `None`.
pub(crate) mod lenient {
    use super::*;

    pub fn serialize<S: Serializer>(
        node_type: &Option<NodeType>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match node_type {
            Some(t) => t.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NodeType>, D::Error> {
        let code = Option::<i64>::deserialize(deserializer)?;
        Ok(code.and_then(NodeType::from_code))
    }
}
