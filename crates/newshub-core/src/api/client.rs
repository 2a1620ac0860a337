use std::time::Duration;

use reqwest::{Client, Method, Proxy, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use url::Url;

use super::session::Session;
use super::NewsSource;
use crate::config::AppConfig;
use crate::feed::{Article, ArticleDraft};
use crate::{Error, Result};

/// Login / registration form
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(Error::InvalidInput(
                "email and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(serde::Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// HTTP client for the news REST API
pub struct NewsClient {
    client: Client,
    base_url: Url,
    session: Option<Session>,
}

impl NewsClient {
    /// Create a client from configuration, optionally authenticated with `session`
    pub fn new(config: &AppConfig, session: Option<Session>) -> Result<Self> {
        let client = Self::build_client(config.api.request_timeout_secs, &config.api.proxy_url)?;
        let base_url = Url::parse(&config.api.base_url)?;

        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API base URL cannot be used as a base: {}",
                base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .user_agent(concat!("newshub/", env!("CARGO_PKG_VERSION")));

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for API requests");
        }

        builder.build().map_err(Error::Http)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match &self.session {
            Some(session) => builder.bearer_auth(&session.access_token),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // A rejected token means the stored session is stale
        if status == StatusCode::UNAUTHORIZED && self.session.is_some() {
            return Err(Error::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }

    /// GET /news
    pub async fn list_articles(&self) -> Result<Vec<Article>> {
        let response = self.send(self.request(Method::GET, &["news"])).await?;
        let articles: Vec<Article> = response.json().await?;
        tracing::info!("Fetched {} articles", articles.len());
        Ok(articles)
    }

    /// GET /news/{id}
    pub async fn get_article(&self, id: &str) -> Result<Article> {
        match self.send(self.request(Method::GET, &["news", id])).await {
            Ok(response) => Ok(response.json().await?),
            Err(Error::Api { status: 404, .. }) => Err(Error::ArticleNotFound(id.to_string())),
            Err(e) => Err(e),
        }
    }

    /// POST /news. Returns the stored article when the API echoes it back.
    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<Option<Article>> {
        draft.validate()?;
        let request = self
            .request(Method::POST, &["news"])
            .json(&draft.payload());
        let response = self.send(request).await?;
        tracing::info!("Created article '{}'", draft.headline);
        Ok(echoed_article(response).await)
    }

    /// PUT /news/{id}
    pub async fn update_article(&self, id: &str, draft: &ArticleDraft) -> Result<Option<Article>> {
        draft.validate()?;
        let request = self
            .request(Method::PUT, &["news", id])
            .json(&draft.payload());
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(Error::Api { status: 404, .. }) => {
                return Err(Error::ArticleNotFound(id.to_string()))
            }
            Err(e) => return Err(e),
        };
        tracing::info!("Updated article {}", id);
        Ok(echoed_article(response).await)
    }

    /// DELETE /news/{id}
    pub async fn delete_article(&self, id: &str) -> Result<()> {
        match self.send(self.request(Method::DELETE, &["news", id])).await {
            Ok(_) => {
                tracing::info!("Deleted article {}", id);
                Ok(())
            }
            Err(Error::Api { status: 404, .. }) => Err(Error::ArticleNotFound(id.to_string())),
            Err(e) => Err(e),
        }
    }

    /// POST /news/{id}/view
    pub async fn increment_view(&self, id: &str) -> Result<()> {
        self.send(self.request(Method::POST, &["news", id, "view"]))
            .await?;
        Ok(())
    }

    /// POST /login, returning the session to inject into later clients
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        credentials.validate()?;
        let request = self.request(Method::POST, &["login"]).json(credentials);
        let response: LoginResponse = self.send(request).await?.json().await?;
        tracing::info!("Logged in as {}", credentials.email);
        Ok(Session::new(response.access_token))
    }

    /// POST /register
    pub async fn register(&self, credentials: &Credentials) -> Result<()> {
        credentials.validate()?;
        let request = self.request(Method::POST, &["register"]).json(credentials);
        self.send(request).await?;
        tracing::info!("Registered {}", credentials.email);
        Ok(())
    }
}

#[async_trait::async_trait]
impl NewsSource for NewsClient {
    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        self.list_articles().await
    }

    async fn fetch_article(&self, id: &str) -> Result<Article> {
        self.get_article(id).await
    }

    async fn increment_view(&self, id: &str) -> Result<()> {
        NewsClient::increment_view(self, id).await
    }
}

async fn echoed_article(response: Response) -> Option<Article> {
    let body = response.text().await.ok()?;
    serde_json::from_str(&body).ok()
}

/// Pull a human readable message out of an error body.
///
/// The API answers with `{"message": "..."}` or, for validation failures,
/// `{"message": ["...", "..."]}`.
fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    };

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() || trimmed.len() > 200 {
            fallback()
        } else {
            trimmed.to_string()
        };
    };

    match value.get("message") {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(serde_json::Value::Array(messages)) => messages
            .iter()
            .filter_map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        _ => fallback(),
    }
}
