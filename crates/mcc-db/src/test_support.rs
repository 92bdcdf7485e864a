//! Shared test utilities for mcc-db unit tests.

pub(crate) mod helpers {
    use mcc_core::entities::Project;

    use crate::repos::project::NewProject;
    use crate::service::ControlService;

    /// Create an in-memory `ControlService`.
    pub async fn test_service() -> ControlService {
        ControlService::new_local(":memory:").await.unwrap()
    }

    /// Insert a bare project with the given name.
    pub async fn create_test_project(svc: &ControlService, name: &str) -> Project {
        svc.create_project(NewProject {
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
    }
}
