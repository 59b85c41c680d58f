mod common;

use common::TestServer;
use credhub_rs::errors::CredHubError;
use credhub_rs::permission::{Actor, Operation, Permission};

#[tokio::test]
async fn test_permission_lifecycle() {
    let server = TestServer::start().await;
    let template = server.template();
    let permissions = template.permissions();

    let actor = Actor::app("8b1c2a3e-5f6d-4c7b-9a8e-0d1f2e3c4b5a");
    let added = permissions
        .add_permission(&Permission::new(
            "/team/app/*",
            actor.clone(),
            vec![Operation::Read, Operation::Write],
        ))
        .await
        .unwrap();
    let id = added.uuid.clone().unwrap();
    assert_eq!(added.actor, actor);

    let fetched = permissions.get_permission(&id).await.unwrap();
    assert_eq!(fetched, added);

    let by_path = permissions
        .get_permission_by_path_and_actor("/team/app/*", &actor)
        .await
        .unwrap();
    assert_eq!(by_path.uuid.as_deref(), Some(id.as_str()));

    let updated = permissions
        .update_permission(
            &id,
            &Permission::new("/team/app/*", actor.clone(), vec![Operation::Read]),
        )
        .await
        .unwrap();
    assert_eq!(updated.operations, vec![Operation::Read]);

    permissions.delete_permission(&id).await.unwrap();
    let err = permissions.get_permission(&id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_duplicate_permission_is_conflict() {
    let server = TestServer::start().await;
    let template = server.template();
    let permission = Permission::new("/shared/*", Actor::client("ops"), vec![Operation::Read]);

    template
        .permissions()
        .add_permission(&permission)
        .await
        .unwrap();
    let err = template
        .permissions()
        .add_permission(&permission)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
async fn test_permission_without_operations_is_rejected_locally() {
    let server = TestServer::start().await;

    let err = server
        .template()
        .permissions()
        .add_permission(&Permission::new("/shared/*", Actor::user("u-1"), vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, CredHubError::InvalidInput(_)));
    assert!(server.state.requests().is_empty());
}

#[tokio::test]
async fn test_dot_segment_id_is_rejected_locally() {
    let server = TestServer::start().await;

    let err = server
        .template()
        .permissions()
        .delete_permission("..")
        .await
        .unwrap_err();

    assert!(matches!(err, CredHubError::InvalidInput(_)));
    assert!(server.state.requests().is_empty());
}
