use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use domain::{DomainError, Node, Region, User};

use crate::service::RegistryService;

/// Decorator that logs every call of the wrapped service with its inputs,
/// outcome and duration. Passwords are never logged.
pub struct LoggingMiddleware {
    next: Arc<dyn RegistryService>,
}

impl LoggingMiddleware {
    pub fn new(next: Arc<dyn RegistryService>) -> Self {
        Self { next }
    }

    /// Wrap `next` and hand it back behind the same interface.
    pub fn wrap(next: Arc<dyn RegistryService>) -> Arc<dyn RegistryService> {
        Arc::new(Self::new(next))
    }
}

/// One event per call: `info!` with input and output fields on success,
/// `warn!` with input fields and the error on failure.
macro_rules! log_call {
    ($method:literal, $begin:ident, $result:ident, [$($input:tt)*], |$out:pat_param| [$($output:tt)*]) => {{
        let elapsed_ms = $begin.elapsed().as_secs_f64() * 1000.0;
        match &$result {
            Ok($out) => info!(method = $method, $($input)* $($output)* elapsed_ms, "call completed"),
            Err(e) => warn!(method = $method, $($input)* elapsed_ms, error = %e, "call failed"),
        }
    }};
}

#[async_trait]
impl RegistryService for LoggingMiddleware {
    async fn auth_user(&self, id: &str, password: &str) -> Result<(), DomainError> {
        let begin = Instant::now();
        let result = self.next.auth_user(id, password).await;
        log_call!("auth_user", begin, result, [id,], |_| []);
        result
    }

    async fn get_user(&self, id: &str) -> Result<User, DomainError> {
        let begin = Instant::now();
        let result = self.next.get_user(id).await;
        log_call!("get_user", begin, result, [id,], |user| [
            name = %user.name,
            email = %user.email,
            region = %user.region,
            group = ?user.group,
        ]);
        result
    }

    async fn add_user(&self, user: User) -> Result<(), DomainError> {
        let begin = Instant::now();
        let (name, email, region) = (user.name.clone(), user.email.clone(), user.region.clone());
        let result = self.next.add_user(user).await;
        log_call!("add_user", begin, result, [
            name = %name,
            email = %email,
            region = %region,
        ], |_| []);
        result
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let begin = Instant::now();
        let result = self.next.list_users().await;
        log_call!("list_users", begin, result, [], |users| [count = users.len(),]);
        result
    }

    async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        let begin = Instant::now();
        let result = self.next.delete_user(id).await;
        log_call!("delete_user", begin, result, [id,], |_| []);
        result
    }

    async fn update_user(&self, id: &str, user: User) -> Result<User, DomainError> {
        let begin = Instant::now();
        let (new_region, new_group) = (user.region.clone(), user.group);
        let result = self.next.update_user(id, user).await;
        log_call!("update_user", begin, result, [
            id,
            new_region = %new_region,
            new_group = ?new_group,
        ], |stored| [
            region = %stored.region,
            group = ?stored.group,
        ]);
        result
    }

    async fn add_node(&self, node: Node) -> Result<(), DomainError> {
        let begin = Instant::now();
        let (addr, name, region) = (node.addr.clone(), node.name.clone(), node.region.clone());
        let node_type = node.node_type;
        let result = self.next.add_node(node).await;
        log_call!("add_node", begin, result, [
            addr = %addr,
            name = %name,
            region = %region,
            node_type = ?node_type,
        ], |_| []);
        result
    }

    async fn get_node(&self, id: &str) -> Result<Node, DomainError> {
        let begin = Instant::now();
        let result = self.next.get_node(id).await;
        log_call!("get_node", begin, result, [id,], |node| [
            addr = %node.addr,
            name = %node.name,
            region = %node.region,
            node_type = ?node.node_type,
        ]);
        result
    }

    async fn list_nodes(&self) -> Result<Vec<Node>, DomainError> {
        let begin = Instant::now();
        let result = self.next.list_nodes().await;
        log_call!("list_nodes", begin, result, [], |nodes| [count = nodes.len(),]);
        result
    }

    async fn delete_node(&self, id: &str) -> Result<(), DomainError> {
        let begin = Instant::now();
        let result = self.next.delete_node(id).await;
        log_call!("delete_node", begin, result, [id,], |_| []);
        result
    }

    async fn update_node(&self, id: &str, node: Node) -> Result<Node, DomainError> {
        let begin = Instant::now();
        let changes = node.to_string();
        let result = self.next.update_node(id, node).await;
        log_call!("update_node", begin, result, [
            id,
            changes = %changes,
        ], |stored| [
            addr = %stored.addr,
            name = %stored.name,
            region = %stored.region,
        ]);
        result
    }

    async fn add_region(&self, region: Region) -> Result<(), DomainError> {
        let begin = Instant::now();
        let (region_id, name) = (region.id.clone(), region.name.clone());
        let result = self.next.add_region(region).await;
        log_call!("add_region", begin, result, [
            region_id = %region_id,
            name = %name,
        ], |_| []);
        result
    }

    async fn list_regions(&self) -> Result<Vec<Region>, DomainError> {
        let begin = Instant::now();
        let result = self.next.list_regions().await;
        log_call!("list_regions", begin, result, [], |regions| [count = regions.len(),]);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockRegistryService;

    #[tokio::test]
    async fn test_delegates_and_returns_inner_result() {
        let mut inner = MockRegistryService::new();
        inner
            .expect_get_user()
            .withf(|id| id == "u1")
            .times(1)
            .returning(|_| {
                Ok(User {
                    id: "u1".into(),
                    name: "Ann".into(),
                    ..Default::default()
                })
            });

        let svc = LoggingMiddleware::wrap(Arc::new(inner));
        let user = svc.get_user("u1").await.unwrap();
        assert_eq!(user.name, "Ann");
    }

    #[tokio::test]
    async fn test_errors_pass_through_unchanged() {
        let mut inner = MockRegistryService::new();
        inner
            .expect_delete_node()
            .times(1)
            .returning(|_| Err(DomainError::NodeNotFound));

        let svc = LoggingMiddleware::wrap(Arc::new(inner));
        assert_eq!(
            svc.delete_node("n1").await.unwrap_err(),
            DomainError::NodeNotFound
        );
    }

    #[tokio::test]
    async fn test_add_user_forwards_the_whole_user() {
        let mut inner = MockRegistryService::new();
        inner
            .expect_add_user()
            .withf(|u| u.password == "longenough" && u.email == "ann@example.com")
            .times(1)
            .returning(|_| Ok(()));

        let svc = LoggingMiddleware::wrap(Arc::new(inner));
        let user = User {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "longenough".into(),
            ..Default::default()
        };
        svc.add_user(user).await.unwrap();
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[tokio::test]
    async fn test_events_carry_fields_but_never_passwords() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut inner = MockRegistryService::new();
        inner.expect_add_user().returning(|_| Ok(()));
        inner
            .expect_update_user()
            .returning(|_, _| Err(DomainError::UserNotFound));
        let svc = LoggingMiddleware::wrap(Arc::new(inner));

        let user = User {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "longenough".into(),
            region: "R1".into(),
            ..Default::default()
        };
        svc.add_user(user).await.unwrap();
        let changes = User {
            region: "R2".into(),
            ..Default::default()
        };
        svc.update_user("ghost", changes).await.unwrap_err();

        let text = captured.text();
        assert!(text.contains("call completed"));
        assert!(text.contains("name=Ann"));
        assert!(text.contains("email=ann@example.com"));
        assert!(text.contains("elapsed_ms"));
        assert!(text.contains("call failed"));
        assert!(text.contains("new_region=R2"));
        assert!(text.contains("error=user not found"));
        assert!(!text.contains("longenough"));
    }
}
