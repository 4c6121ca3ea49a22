use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mac::is_mac_addr;
use super::node_type::{NodeType, lenient};
use crate::DomainError;
use crate::identity::IdProvider;

/// An edge node deployed in the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    pub uuid: String,
    /// Hardware (MAC) address
    pub addr: String,
    pub name: String,
    #[serde(rename = "type", with = "lenient")]
    pub node_type: Option<NodeType>,
    pub region: String,
    #[serde(rename = "latitude")]
    pub lat: String,
    #[serde(rename = "longitude")]
    pub long: String,
    pub created: Option<DateTime<Utc>>,
    /// Id of the master node, if any
    #[serde(skip_serializing_if = "String::is_empty")]
    pub master: String,
}

impl Node {
    /// Build a node from the caller supplied `draft`, assigning a fresh id and
    /// creation time.
    pub fn create(ids: &dyn IdProvider, draft: &Node) -> Result<Self, DomainError> {
        let uuid = ids.id()?;

        if !is_mac_addr(&draft.addr) {
            return Err(DomainError::InvalidMacAddress);
        }
        let node_type = draft.node_type.ok_or(DomainError::InvalidNodeType)?;

        Ok(Self {
            uuid,
            addr: draft.addr.clone(),
            name: draft.name.clone(),
            node_type: Some(node_type),
            region: draft.region.clone(),
            lat: draft.lat.clone(),
            long: draft.long.clone(),
            created: Some(Utc::now()),
            master: draft.master.clone(),
        })
    }

    /// Apply the non-empty fields of `changes` on top of this node.
    ///
    /// The id and creation time never change.
    pub fn merge(&mut self, changes: &Node) -> Result<(), DomainError> {
        if !changes.addr.is_empty() {
            if !is_mac_addr(&changes.addr) {
                return Err(DomainError::InvalidMacAddress);
            }
            self.addr = changes.addr.clone();
        }
        if let Some(node_type) = changes.node_type {
            self.node_type = Some(node_type);
        }

        let text_fields = [
            (&mut self.name, &changes.name),
            (&mut self.region, &changes.region),
            (&mut self.lat, &changes.lat),
            (&mut self.long, &changes.long),
            (&mut self.master, &changes.master),
        ];
        for (current, new) in text_fields {
            if !new.is_empty() {
                current.clone_from(new);
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node_type = self
            .node_type
            .map(|t| t.as_str())
            .unwrap_or("unrecognized node type");
        let created = self
            .created
            .map(|c| c.to_rfc3339())
            .unwrap_or_default();
        write!(
            f,
            "node = [id = {}, addr = {}, name = {}, type = {}, region = {}, lat = {}, long = {}, created = {}, master = {}]",
            self.uuid,
            self.addr,
            self.name,
            node_type,
            self.region,
            self.lat,
            self.long,
            created,
            self.master
        )
    }
}
