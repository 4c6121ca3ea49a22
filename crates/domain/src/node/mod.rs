mod entity;
mod mac;
mod node_type;
mod repository;

pub use entity::Node;
pub use mac::is_mac_addr;
pub use node_type::NodeType;
pub use repository::NodeRepository;

#[cfg(test)]
pub use repository::MockNodeRepository;
