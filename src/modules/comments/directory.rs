//! Lookup of blogs owned by the blog service.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use blogmesh_config::ServiceEndpoint;

/// Answers whether a blog exists. Any failure to find out counts as absent.
#[async_trait]
pub trait BlogDirectory: Send + Sync {
    async fn blog_exists(&self, blog_id: Uuid) -> bool;
}

/// Asks the blog service with `GET /api/blogs/{id}`.
#[derive(Clone, Debug)]
pub struct HttpBlogDirectory {
    client: reqwest::Client,
    blog_service: ServiceEndpoint,
}

impl HttpBlogDirectory {
    pub fn new(blog_service: ServiceEndpoint, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            blog_service,
        })
    }
}

#[async_trait]
impl BlogDirectory for HttpBlogDirectory {
    async fn blog_exists(&self, blog_id: Uuid) -> bool {
        let url = self.blog_service.url(&format!("/api/blogs/{}", blog_id));

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(blog_id = %blog_id, status = %response.status().as_u16(), "Blog lookup missed");
                false
            }
            Err(e) => {
                warn!(blog_id = %blog_id, error = %e, "Blog service unreachable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn directory(uri: &str) -> HttpBlogDirectory {
        HttpBlogDirectory::new(
            ServiceEndpoint::new("blog-service", uri),
            Duration::from_millis(500),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_existing_blog() {
        let server = MockServer::start().await;
        let blog_id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path(format!("/api/blogs/{}", blog_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": blog_id})))
            .mount(&server)
            .await;

        assert!(directory(&server.uri()).blog_exists(blog_id).await);
    }

    #[tokio::test]
    async fn test_missing_blog() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(!directory(&server.uri()).blog_exists(Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn test_unreachable_blog_service() {
        assert!(!directory("http://127.0.0.1:1").blog_exists(Uuid::new_v4()).await);
    }
}
