use async_trait::async_trait;
use std::sync::Arc;

use domain::{
    DomainError, IdProvider, Node, NodeRepository, PasswordHasher, Region, RegionRepository,
    User, UserRepository,
};

use super::RegistryService;

/// Stateless implementation of [`RegistryService`] over the repositories.
pub struct Registry {
    users: Arc<dyn UserRepository>,
    nodes: Arc<dyn NodeRepository>,
    regions: Arc<dyn RegionRepository>,
    hasher: Arc<dyn PasswordHasher>,
    ids: Arc<dyn IdProvider>,
}

impl Registry {
    pub fn new(
        users: Arc<dyn UserRepository>,
        nodes: Arc<dyn NodeRepository>,
        regions: Arc<dyn RegionRepository>,
        hasher: Arc<dyn PasswordHasher>,
        ids: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            users,
            nodes,
            regions,
            hasher,
            ids,
        }
    }
}

#[async_trait]
impl RegistryService for Registry {
    async fn auth_user(&self, id: &str, password: &str) -> Result<(), DomainError> {
        let user = self.users.get(id).await?;
        self.hasher.verify(&user.password, password)
    }

    async fn get_user(&self, id: &str) -> Result<User, DomainError> {
        self.users.get(id).await.map(User::redacted)
    }

    async fn add_user(&self, user: User) -> Result<(), DomainError> {
        // only name, email, password and region are taken from the input
        if user.name.is_empty() || user.email.is_empty() || user.password.is_empty() {
            return Err(DomainError::BadBodyRequest);
        }

        let user = User::create(
            self.hasher.as_ref(),
            self.ids.as_ref(),
            &user.name,
            &user.email,
            &user.password,
            &user.region,
        )?;

        self.users.add(&user).await
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.list().await?;
        Ok(users.into_iter().map(User::redacted).collect())
    }

    async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        self.users.delete(id).await
    }

    async fn update_user(&self, id: &str, user: User) -> Result<User, DomainError> {
        self.users.update(id, &user).await.map(User::redacted)
    }

    async fn add_node(&self, node: Node) -> Result<(), DomainError> {
        let node = Node::create(self.ids.as_ref(), &node)?;
        self.nodes.add(&node).await
    }

    async fn get_node(&self, id: &str) -> Result<Node, DomainError> {
        self.nodes.get(id).await
    }

    async fn list_nodes(&self) -> Result<Vec<Node>, DomainError> {
        self.nodes.list().await
    }

    async fn delete_node(&self, id: &str) -> Result<(), DomainError> {
        self.nodes.delete(id).await
    }

    async fn update_node(&self, id: &str, node: Node) -> Result<Node, DomainError> {
        self.nodes.update(id, &node).await
    }

    async fn add_region(&self, region: Region) -> Result<(), DomainError> {
        region.validate()?;
        self.regions.add(&region).await
    }

    async fn list_regions(&self) -> Result<Vec<Region>, DomainError> {
        self.regions.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{NodeType, UserGroup};
    use mockall::mock;

    mock! {
        Users {}
        #[async_trait]
        impl UserRepository for Users {
            async fn get(&self, id: &str) -> Result<User, DomainError>;
            async fn add(&self, user: &User) -> Result<(), DomainError>;
            async fn delete(&self, id: &str) -> Result<(), DomainError>;
            async fn list(&self) -> Result<Vec<User>, DomainError>;
            async fn update(&self, id: &str, user: &User) -> Result<User, DomainError>;
        }
    }

    mock! {
        Nodes {}
        #[async_trait]
        impl NodeRepository for Nodes {
            async fn get(&self, id: &str) -> Result<Node, DomainError>;
            async fn add(&self, node: &Node) -> Result<(), DomainError>;
            async fn delete(&self, id: &str) -> Result<(), DomainError>;
            async fn list(&self) -> Result<Vec<Node>, DomainError>;
            async fn update(&self, id: &str, node: &Node) -> Result<Node, DomainError>;
        }
    }

    mock! {
        Regions {}
        #[async_trait]
        impl RegionRepository for Regions {
            async fn get(&self, id: &str) -> Result<Region, DomainError>;
            async fn add(&self, region: &Region) -> Result<(), DomainError>;
            async fn delete(&self, id: &str) -> Result<(), DomainError>;
            async fn list(&self) -> Result<Vec<Region>, DomainError>;
            async fn update(&self, id: &str, region: &Region) -> Result<Region, DomainError>;
        }
    }

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, hash: &str, password: &str) -> Result<(), DomainError> {
            if hash == format!("hashed:{password}") {
                Ok(())
            } else {
                Err(DomainError::InvalidCredentials)
            }
        }
    }

    struct FixedIds;

    impl IdProvider for FixedIds {
        fn id(&self) -> Result<String, DomainError> {
            Ok("id-1".to_string())
        }
    }

    fn registry(users: MockUsers, nodes: MockNodes, regions: MockRegions) -> Registry {
        Registry::new(
            Arc::new(users),
            Arc::new(nodes),
            Arc::new(regions),
            Arc::new(PlainHasher),
            Arc::new(FixedIds),
        )
    }

    fn stored_user() -> User {
        User {
            id: "id-1".into(),
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "hashed:longenough".into(),
            group: Some(UserGroup::RegionUser),
            region: "R1".into(),
            created: None,
        }
    }

    #[tokio::test]
    async fn test_add_user_creates_region_user() {
        let mut users = MockUsers::new();
        users
            .expect_add()
            .withf(|u| {
                u.id == "id-1"
                    && u.group == Some(UserGroup::RegionUser)
                    && u.password == "hashed:longenough"
                    && u.created.is_some()
            })
            .times(1)
            .returning(|_| Ok(()));

        let svc = registry(users, MockNodes::new(), MockRegions::new());
        let input = User {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "longenough".into(),
            region: "R1".into(),
            ..Default::default()
        };

        svc.add_user(input).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_user_requires_fields() {
        let mut users = MockUsers::new();
        users.expect_add().never();
        let svc = registry(users, MockNodes::new(), MockRegions::new());

        let input = User {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            svc.add_user(input).await.unwrap_err(),
            DomainError::BadBodyRequest
        );
    }

    #[tokio::test]
    async fn test_add_user_invalid_email_propagates() {
        let mut users = MockUsers::new();
        users.expect_add().never();
        let svc = registry(users, MockNodes::new(), MockRegions::new());

        let input = User {
            name: "Ann".into(),
            email: "ann-at-example.com".into(),
            password: "longenough".into(),
            ..Default::default()
        };
        assert_eq!(
            svc.add_user(input).await.unwrap_err(),
            DomainError::InvalidEmail
        );
    }

    #[tokio::test]
    async fn test_get_user_is_redacted() {
        let mut users = MockUsers::new();
        users
            .expect_get()
            .withf(|id| id == "id-1")
            .returning(|_| Ok(stored_user()));
        let svc = registry(users, MockNodes::new(), MockRegions::new());

        let user = svc.get_user("id-1").await.unwrap();
        assert!(user.password.is_empty());
        assert_eq!(user.name, "Ann");
    }

    #[tokio::test]
    async fn test_auth_user() {
        let mut users = MockUsers::new();
        users.expect_get().returning(|_| Ok(stored_user()));
        let svc = registry(users, MockNodes::new(), MockRegions::new());

        assert!(svc.auth_user("id-1", "longenough").await.is_ok());
        assert_eq!(
            svc.auth_user("id-1", "wrong-password").await.unwrap_err(),
            DomainError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_auth_unknown_user() {
        let mut users = MockUsers::new();
        users
            .expect_get()
            .returning(|_| Err(DomainError::UserNotFound));
        let svc = registry(users, MockNodes::new(), MockRegions::new());

        assert_eq!(
            svc.auth_user("ghost", "longenough").await.unwrap_err(),
            DomainError::UserNotFound
        );
    }

    #[tokio::test]
    async fn test_add_node_propagates_validation() {
        let mut nodes = MockNodes::new();
        nodes.expect_add().never();
        let svc = registry(MockUsers::new(), nodes, MockRegions::new());

        let draft = Node {
            addr: "bogus".into(),
            node_type: Some(NodeType::Sensor),
            ..Default::default()
        };
        assert_eq!(
            svc.add_node(draft).await.unwrap_err(),
            DomainError::InvalidMacAddress
        );
    }

    #[tokio::test]
    async fn test_add_node_assigns_id() {
        let mut nodes = MockNodes::new();
        nodes
            .expect_add()
            .withf(|n| n.uuid == "id-1" && n.created.is_some())
            .times(1)
            .returning(|_| Ok(()));
        let svc = registry(MockUsers::new(), nodes, MockRegions::new());

        let draft = Node {
            addr: "00:1B:44:11:3A:B7".into(),
            name: "n1".into(),
            node_type: Some(NodeType::Sensor),
            ..Default::default()
        };
        svc.add_node(draft).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_region_validates() {
        let mut regions = MockRegions::new();
        regions.expect_add().times(1).returning(|_| Ok(()));
        let svc = registry(MockUsers::new(), MockNodes::new(), regions);

        svc.add_region(Region::new("R1", "Coast", "coastal sites"))
            .await
            .unwrap();
        assert_eq!(
            svc.add_region(Region::default()).await.unwrap_err(),
            DomainError::BadBodyRequest
        );
    }

    #[tokio::test]
    async fn test_repository_errors_pass_through() {
        let mut nodes = MockNodes::new();
        nodes
            .expect_delete()
            .returning(|_| Err(DomainError::Storage("connection reset".into())));
        let svc = registry(MockUsers::new(), nodes, MockRegions::new());

        assert_eq!(
            svc.delete_node("n1").await.unwrap_err(),
            DomainError::Storage("connection reset".into())
        );
    }
}
