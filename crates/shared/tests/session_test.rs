use anyhow::Result;
use shared::{
    abstract_trait::SessionManagerTrait,
    errors::ServiceError,
    session::{MemorySessionManager, Session, SessionId},
};

#[tokio::test]
async fn create_check_delete() -> Result<()> {
    let manager = MemorySessionManager::new();

    let id = manager.create(&Session { user_id: 7 }).await?;
    assert!(!id.as_str().is_empty());
    assert_eq!(manager.check(&id).await?, Session { user_id: 7 });

    manager.delete(&id).await?;
    assert!(manager.is_empty().await);
    assert!(matches!(
        manager.check(&id).await,
        Err(ServiceError::SessionNotFound)
    ));

    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let manager = MemorySessionManager::new();
    let unknown = SessionId("missing".into());

    assert!(matches!(
        manager.check(&unknown).await,
        Err(ServiceError::SessionNotFound)
    ));
    assert!(matches!(
        manager.delete(&unknown).await,
        Err(ServiceError::SessionNotFound)
    ));
}

#[tokio::test]
async fn sessions_get_distinct_ids() -> Result<()> {
    let manager = MemorySessionManager::new();

    let first = manager.create(&Session { user_id: 1 }).await?;
    let second = manager.create(&Session { user_id: 1 }).await?;

    assert_ne!(first, second);
    assert_eq!(manager.len().await, 2);

    Ok(())
}
