use polaroid_wall::compression::CompressionSettings;
use polaroid_wall::photo::{Location, Photo, Position};
use polaroid_wall::remote::{
    GalleryBackend, RemoteError, RemoteGalleryClient, RemoteProviderConfig, UploadOutcome,
    create_backend,
};
use polaroid_wall::storage::{MemoryStore, PhotoStore};
use std::sync::Arc;

fn shared_print(id: &str) -> Photo {
    Photo {
        id: id.to_string(),
        image_data: "data:image/jpeg;base64,AAAA".to_string(),
        captured_at: 1_700_000_000_000,
        position: Position::new(10.0, 20.0),
        orientation: 2.5,
        caption: Some("Sunset".to_string()),
        caption_pending: false,
        is_public: true,
        development_progress: 100.0,
        location: Some(Location::new(35.0, 139.0).with_city("Tokyo")),
    }
}

#[tokio::test]
async fn test_null_backend_refuses_uploads() {
    let backend = create_backend(&RemoteProviderConfig::None).unwrap();
    assert!(!backend.is_configured());

    let result = backend.insert(&shared_print("p1")).await;
    assert!(matches!(result, Err(RemoteError::NotConfigured)));
    assert!(backend.query_recent(10).await.unwrap().is_empty());

    println!("Upload refused by {}", backend.name());
}

#[tokio::test]
async fn test_null_backend_redirects_shares_to_fallback_pool() {
    let store = PhotoStore::new(
        Arc::new(MemoryStore::new()),
        500_000,
        CompressionSettings::new(800, 70),
    );
    let backend = create_backend(&RemoteProviderConfig::None).unwrap();
    let client = RemoteGalleryClient::new(backend, store.clone(), CompressionSettings::new(600, 60));

    let outcome = client.upload_to_cloud(&shared_print("p1")).await.unwrap();
    assert_eq!(outcome, UploadOutcome::LocalPool);

    // Sharing again overwrites rather than duplicates.
    let mut edited = shared_print("p1");
    edited.caption = Some("Golden hour".to_string());
    client.upload_to_cloud(&edited).await.unwrap();

    let pool = store.get_shared_pool_local().await;
    assert_eq!(pool, vec![edited]);
    assert!(client.fetch_recent(50).await.is_empty());
}
