use axum::body::Bytes;
use hotel_ops_api::{
    error::AppError,
    storage::{BlobStore, LocalBlobStore, StorageError, put_then_record},
};
use uuid::Uuid;

fn store() -> LocalBlobStore {
    let root = std::env::temp_dir().join(format!("hotel-ops-blobs-{}", Uuid::new_v4()));
    LocalBlobStore::new(root, "http://localhost:8080/uploads/")
}

#[tokio::test]
async fn put_writes_file_and_returns_public_url() {
    let store = store();
    let url = store
        .put("maintenance/abc/photo.jpg", Bytes::from_static(b"jpeg"))
        .await
        .expect("stored");
    assert_eq!(url, "http://localhost:8080/uploads/maintenance/abc/photo.jpg");

    let written = tokio::fs::read(store.root().join("maintenance/abc/photo.jpg"))
        .await
        .expect("file on disk");
    assert_eq!(written, b"jpeg");
}

#[tokio::test]
async fn put_rejects_paths_outside_root() {
    let store = store();
    for path in ["../escape.jpg", "/etc/passwd", "a/../../b.jpg", ""] {
        let err = store
            .put(path, Bytes::from_static(b"x"))
            .await
            .expect_err("path must be rejected");
        assert!(matches!(err, StorageError::InvalidPath(_)), "{path}");
    }
}

#[tokio::test]
async fn put_rejects_empty_upload() {
    let err = store()
        .put("maintenance/x.jpg", Bytes::new())
        .await
        .expect_err("empty body");
    assert!(matches!(err, StorageError::Empty));
}

#[tokio::test]
async fn delete_removes_file_and_ignores_missing_ones() {
    let store = store();
    store
        .put("maintenance/gone.jpg", Bytes::from_static(b"jpeg"))
        .await
        .expect("stored");
    store.delete("maintenance/gone.jpg").await.expect("deleted");
    assert!(!store.root().join("maintenance/gone.jpg").exists());

    store.delete("maintenance/gone.jpg").await.expect("already gone");
    assert!(matches!(
        store.delete("../outside.jpg").await,
        Err(StorageError::InvalidPath(_))
    ));
}

#[tokio::test]
async fn failed_record_removes_the_upload() {
    let store = store();
    let result: Result<(), AppError> = put_then_record(
        &store,
        "maintenance/t1/photo.jpg",
        Bytes::from_static(b"jpeg"),
        |_url| async { Err(AppError::NotFound) },
    )
    .await;

    assert!(matches!(result, Err(AppError::NotFound)));
    assert!(!store.root().join("maintenance/t1/photo.jpg").exists());
}

#[tokio::test]
async fn successful_record_keeps_the_upload() {
    let store = store();
    let url = put_then_record(
        &store,
        "maintenance/t2/photo.jpg",
        Bytes::from_static(b"jpeg"),
        |url| async move { Ok::<_, AppError>(url) },
    )
    .await
    .expect("recorded");

    assert!(url.ends_with("/uploads/maintenance/t2/photo.jpg"));
    assert!(store.root().join("maintenance/t2/photo.jpg").exists());
}
