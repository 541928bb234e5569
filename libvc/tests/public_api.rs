use libvc::client::HttpClient;
use libvc::{ClientSet, Context, ImageClient, QuayClient, RegistryError};

#[test]
fn test_version_is_set() {
    assert!(!libvc::version().is_empty());
}

#[test]
fn test_parse_digest_reexport() {
    let sha = format!("sha256:{}", "0".repeat(64));
    assert_eq!(libvc::parse_digest(&sha).unwrap(), sha);
}

#[tokio::test]
async fn test_client_set_routes_quay_images_to_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/repository/jetstack/cert-manager-controller")
        .with_status(200)
        .with_body(format!(
            r#"{{"tags":{{"v1.14.0":{{"manifest_digest":"sha256:{}","last_modified":"Wed, 07 Feb 2024 12:30:00 +0100"}}}}}}"#,
            "1".repeat(64)
        ))
        .create_async()
        .await;

    let quay = QuayClient::with_http(
        HttpClient::new().unwrap(),
        &format!("{}/api/v1/repository", server.url()),
    );
    let mut clients = ClientSet::new();
    clients.register(quay);

    let tags = clients
        .tags(&Context::new(), "quay.io/jetstack/cert-manager-controller")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].tag, "v1.14.0");
    assert_eq!(tags[0].timestamp.to_rfc3339(), "2024-02-07T12:30:00+01:00");
}

#[tokio::test]
async fn test_quay_client_rejects_foreign_image() {
    let quay = QuayClient::new().unwrap();
    assert!(!quay.is_client("ghcr.io/org/image"));

    let err = quay
        .tags(&Context::new(), "ghcr.io/org/image")
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotThisRegistry { .. }));
}
