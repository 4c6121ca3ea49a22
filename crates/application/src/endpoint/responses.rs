//! Response shapes, one per operation.
//!
//! Each response embeds the domain error of the call next to its value. The
//! server promotes a present error to an HTTP error status before anything
//! reaches the wire, so a decoded success body always carries `null` there.

use domain::{DomainError, Node, Region, User};
use serde::{Deserialize, Serialize};

/// Implemented by every response: exposes the embedded domain error.
pub trait Failure {
    type Value;

    fn failed(&self) -> Option<&DomainError>;

    /// Split the response into the value or the embedded domain error.
    fn into_result(self) -> Result<Self::Value, DomainError>;
}

/// Encodes the embedded error as its message (or `null`).
mod wire_error {
    use domain::DomainError;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        err: &Option<DomainError>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match err {
            Some(e) => serializer.serialize_str(&e.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DomainError>, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map(DomainError::Remote))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthUserResponse {
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetUserResponse {
    #[serde(default)]
    pub user: User,
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddUserResponse {
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListUserResponse {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    #[serde(rename = "r0", default)]
    pub user: User,
    #[serde(rename = "e1", default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddNodeResponse {
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetNodeResponse {
    #[serde(default)]
    pub node: Node,
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListNodesResponse {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteNodeResponse {
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateNodeResponse {
    #[serde(rename = "r0", default)]
    pub node: Node,
    #[serde(rename = "e1", default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddRegionResponse {
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListRegionsResponse {
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default, with = "wire_error")]
    pub err: Option<DomainError>,
}

// Responses that only carry the error.
macro_rules! impl_unit_failure {
    ($($response:ty),+ $(,)?) => {
        $(
            impl Failure for $response {
                type Value = ();

                fn failed(&self) -> Option<&DomainError> {
                    self.err.as_ref()
                }

                fn into_result(self) -> Result<(), DomainError> {
                    self.err.map_or(Ok(()), Err)
                }
            }

            impl From<Result<(), DomainError>> for $response {
                fn from(result: Result<(), DomainError>) -> Self {
                    Self { err: result.err() }
                }
            }
        )+
    };
}

impl_unit_failure!(
    AuthUserResponse,
    AddUserResponse,
    DeleteUserResponse,
    AddNodeResponse,
    DeleteNodeResponse,
    AddRegionResponse,
);

// Responses carrying a value next to the error, keyed by the value field.
macro_rules! impl_value_failure {
    ($($response:ty => $field:ident: $value:ty),+ $(,)?) => {
        $(
            impl Failure for $response {
                type Value = $value;

                fn failed(&self) -> Option<&DomainError> {
                    self.err.as_ref()
                }

                fn into_result(self) -> Result<$value, DomainError> {
                    match self.err {
                        Some(e) => Err(e),
                        None => Ok(self.$field),
                    }
                }
            }

            impl From<Result<$value, DomainError>> for $response {
                fn from(result: Result<$value, DomainError>) -> Self {
                    match result {
                        Ok($field) => Self { $field, err: None },
                        Err(e) => Self { err: Some(e), ..Default::default() },
                    }
                }
            }
        )+
    };
}

impl_value_failure!(
    GetUserResponse => user: User,
    ListUserResponse => users: Vec<User>,
    UpdateUserResponse => user: User,
    GetNodeResponse => node: Node,
    ListNodesResponse => nodes: Vec<Node>,
    UpdateNodeResponse => node: Node,
    ListRegionsResponse => regions: Vec<Region>,
);
