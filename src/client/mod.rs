//! Typed async client for the SharkServers API.
//!
//! The client keeps a cookie store, so logging in once authenticates every later call on
//! the same `ApiClient`. Game server tooling can instead authenticate as an app with
//! `with_app_credentials`.
//!
//! ```rust,ignore
//! let client = ApiClient::new("http://localhost:8080")?;
//! client.login("shark", "password123").await?;
//! let categories = client.get_categories(0, 20).await?;
//! ```

pub mod api;
pub mod error;
pub mod helper;

use reqwest::{Method, RequestBuilder};

use crate::server::middleware::auth::{CLIENT_ID_HEADER, CLIENT_SECRET_HEADER};

pub use error::ApiError;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    app_credentials: Option<(String, String)>,
}

impl ApiClient {
    /// Creates a client for the API served at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            app_credentials: None,
        })
    }

    /// Sends `X-Client-Id` and `X-Client-Secret` with every request.
    pub fn with_app_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.app_credentials = Some((client_id.into(), client_secret.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));

        match &self.app_credentials {
            Some((client_id, client_secret)) => request
                .header(CLIENT_ID_HEADER, client_id)
                .header(CLIENT_SECRET_HEADER, client_secret),
            None => request,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    /// GET with `?page=&entries=`.
    fn get_page(&self, path: &str, page: u64, entries: u64) -> RequestBuilder {
        self.get(path).query(&[("page", page), ("entries", entries)])
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }
}
