//! Content gateway client.
//!
//! Thin typed layer over the Prismic-style repository HTTP API. Queries
//! follow the v2 flow: fetch the repository metadata to obtain the current
//! master ref, then hit `documents/search` with a predicate, an optional
//! field restriction, and a page size. Paginated responses carry a
//! `next_page` URL that can be fetched directly.
//!
//! No retries and no explicit timeouts — every call is a single attempt on
//! the transport defaults, and failures surface as [`AppError::Gateway`].

use reqwest::Url;
use serde::Deserialize;

use crate::error::AppError;

/// A document returned by the gateway.
///
/// `data` is kept as raw JSON; view models extract the fields they need and
/// ignore the rest, so schema additions on the gateway side are harmless.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    /// ISO-8601 timestamp as sent by the gateway (offsets like `+0000` are
    /// not valid RFC 3339, so parsing is deferred to the view models).
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// One page of query results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Document>,
    /// URL of the next page, absent or null on the last page.
    #[serde(default)]
    pub next_page: Option<String>,
}

/// Options for a document query.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Restrict returned `data` to these fields (e.g. `post.title`).
    pub fetch: Vec<String>,
    pub page_size: Option<u32>,
}

/// Repository metadata, used only to pick the master ref.
#[derive(Debug, Deserialize)]
struct RepositoryMeta {
    #[serde(default)]
    refs: Vec<RepositoryRef>,
}

#[derive(Debug, Deserialize)]
struct RepositoryRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master: bool,
}

/// Gateway client. Cheap to clone via [`crate::state::AppState`]'s `Arc`.
pub struct Client {
    http: reqwest::Client,
    api_url: Url,
    access_token: Option<String>,
}

impl Client {
    pub fn new(api_url: &str, access_token: Option<String>) -> anyhow::Result<Self> {
        let api_url = Url::parse(api_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            api_url,
            access_token,
        })
    }

    /// Query documents of a type, newest pagination semantics left to the
    /// gateway. Returns one page plus the next-page cursor.
    pub async fn query(
        &self,
        document_type: &str,
        options: &QueryOptions,
    ) -> Result<QueryResponse, AppError> {
        let predicate = format!("[[at(document.type,\"{document_type}\")]]");
        self.search(&predicate, options).await
    }

    /// Fetch a single document by its uid, or `None` when the gateway has no
    /// such document.
    pub async fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> Result<Option<Document>, AppError> {
        let predicate = format!("[[at(my.{document_type}.uid,\"{uid}\")]]");
        let options = QueryOptions {
            page_size: Some(1),
            ..Default::default()
        };
        let response = self.search(&predicate, &options).await?;
        Ok(response.results.into_iter().next())
    }

    /// Fetch a gateway-supplied next-page URL.
    ///
    /// The cursor arrives from the browser, so it is validated against the
    /// configured API host before any request is made.
    pub async fn fetch_page(&self, cursor: &str) -> Result<QueryResponse, AppError> {
        let url = self.validate_cursor(cursor)?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Parse a cursor URL and check it points at the configured gateway.
    pub fn validate_cursor(&self, cursor: &str) -> Result<Url, AppError> {
        let url = Url::parse(cursor)
            .map_err(|e| AppError::UnexpectedResponse(format!("bad cursor url: {e}")))?;
        if url.host_str() != self.api_url.host_str() {
            return Err(AppError::UnexpectedResponse(format!(
                "cursor host {:?} does not match gateway host {:?}",
                url.host_str(),
                self.api_url.host_str()
            )));
        }
        Ok(url)
    }

    async fn search(
        &self,
        predicate: &str,
        options: &QueryOptions,
    ) -> Result<QueryResponse, AppError> {
        let master_ref = self.master_ref().await?;

        let url = self.join("documents/search")?;
        let mut request = self
            .http
            .get(url)
            .query(&[("ref", master_ref.as_str()), ("q", predicate)]);

        if let Some(size) = options.page_size {
            request = request.query(&[("pageSize", size.to_string())]);
        }
        if !options.fetch.is_empty() {
            request = request.query(&[("fetch", options.fetch.join(","))]);
        }
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token.as_str())]);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Fetch the repository metadata and return the master ref.
    async fn master_ref(&self) -> Result<String, AppError> {
        let mut request = self.http.get(self.api_url.clone());
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token.as_str())]);
        }

        let meta: RepositoryMeta = request.send().await?.error_for_status()?.json().await?;

        meta.refs
            .iter()
            .find(|r| r.is_master)
            .or_else(|| meta.refs.first())
            .map(|r| r.reference.clone())
            .ok_or_else(|| {
                AppError::UnexpectedResponse("repository metadata has no refs".to_string())
            })
    }

    fn join(&self, path: &str) -> Result<Url, AppError> {
        // The API URL may or may not carry a trailing slash
        let base = if self.api_url.path().ends_with('/') {
            self.api_url.clone()
        } else {
            Url::parse(&format!("{}/", self.api_url))
                .map_err(|e| AppError::UnexpectedResponse(e.to_string()))?
        };
        base.join(path)
            .map_err(|e| AppError::UnexpectedResponse(e.to_string()))
    }
}
