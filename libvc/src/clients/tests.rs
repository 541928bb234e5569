use super::*;
use async_trait::async_trait;
use chrono::{FixedOffset, TimeZone};

/// Client that serves a fixed prefix and returns one canned tag.
#[derive(Debug)]
struct StaticClient {
    name: &'static str,
    prefix: &'static str,
}

#[async_trait]
impl ImageClient for StaticClient {
    fn name(&self) -> &str {
        self.name
    }

    fn is_client(&self, image: &str) -> bool {
        image.starts_with(self.prefix)
    }

    async fn tags(&self, _ctx: &Context, image: &str) -> Result<Vec<ImageTag>> {
        if !self.is_client(image) {
            return Err(RegistryError::not_this_registry(self.prefix, image));
        }
        Ok(vec![ImageTag {
            tag: self.name.to_string(),
            sha: format!("sha256:{}", "f".repeat(64)),
            timestamp: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .unwrap(),
        }])
    }
}

#[test]
fn test_new_set_is_empty() {
    let set = ClientSet::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert!(set.client_for("quay.io/org/image").is_none());
}

#[test]
fn test_from_config_registers_quay() {
    let set = ClientSet::from_config(&Config::default()).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.client_for("quay.io/org/image").unwrap().name(), "quay");
}

#[test]
fn test_client_for_picks_matching_client() {
    let mut set = ClientSet::new();
    set.register(StaticClient {
        name: "ghcr",
        prefix: "ghcr.io/",
    })
    .register(StaticClient {
        name: "gcr",
        prefix: "gcr.io/",
    });

    assert_eq!(set.client_for("gcr.io/a/b").unwrap().name(), "gcr");
    assert_eq!(set.client_for("ghcr.io/a/b").unwrap().name(), "ghcr");
    assert!(set.client_for("quay.io/a/b").is_none());
}

#[test]
fn test_first_registered_client_wins() {
    let mut set = ClientSet::new();
    set.register(StaticClient {
        name: "first",
        prefix: "quay.io/",
    })
    .register(StaticClient {
        name: "second",
        prefix: "quay.io/",
    });

    assert_eq!(set.client_for("quay.io/a/b").unwrap().name(), "first");
}

#[tokio::test]
async fn test_tags_routes_to_client() {
    let mut set = ClientSet::new();
    set.register(StaticClient {
        name: "ghcr",
        prefix: "ghcr.io/",
    });

    let tags = set.tags(&Context::new(), "ghcr.io/org/image").await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].tag, "ghcr");
}

#[tokio::test]
async fn test_tags_without_client_fails() {
    let set = ClientSet::new();
    let err = set
        .tags(&Context::new(), "docker.io/library/alpine")
        .await
        .unwrap_err();

    match err {
        RegistryError::NoClient { image } => assert_eq!(image, "docker.io/library/alpine"),
        other => panic!("Expected NoClient, got {:?}", other),
    }
}
