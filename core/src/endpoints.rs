//! The catalog's endpoints.
//!
//! # Design
//! Each endpoint is one `Endpoint` variant that knows its path template and
//! query parameters. Paged endpoints take an explicit `Option<u32>` size that
//! falls back to `DEFAULT_PAGE_SIZE`. Required string arguments are checked
//! before a request is built, so a blank id never reaches the network.

use tokio::task::JoinHandle;

use crate::client::{Callback, SpigetClient};
use crate::error::ApiError;
use crate::query::{encode_segment, QueryParam};
use crate::types::ApiResult;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Resources { size: Option<u32> },
    NewResources { size: Option<u32> },
    Resource { id: &'a str },
    ResourceVersions { id: &'a str },
    ResourceVersion { id: &'a str, version: &'a str },
    ResourceVersionDownload { id: &'a str, version: &'a str },
    ResourceAuthor { id: &'a str },
    Categories,
    Category { id: &'a str },
    CategoryResources { id: &'a str, size: Option<u32> },
    Authors { size: Option<u32> },
    Author { id: &'a str },
    AuthorResources { id: &'a str },
    NewAuthors { size: Option<u32> },
    /// `field` is `name` or `tag` on the public API.
    SearchResources { query: &'a str, field: &'a str },
    /// `field` is `username` on the public API.
    SearchAuthors { query: &'a str, field: &'a str },
}

impl Endpoint<'_> {
    /// Resolve to a path relative to the version prefix plus its query
    /// parameters.
    pub fn resolve(&self) -> Result<(String, Vec<QueryParam>), ApiError> {
        let resolved = match *self {
            Endpoint::Resources { size } => ("resources".to_string(), paged(size)),
            Endpoint::NewResources { size } => ("resources/new".to_string(), paged(size)),
            Endpoint::Resource { id } => (format!("resources/{}", segment(id, "resource")?), Vec::new()),
            Endpoint::ResourceVersions { id } => {
                (format!("resources/{}/versions", segment(id, "resource")?), Vec::new())
            }
            Endpoint::ResourceVersion { id, version } => (
                format!(
                    "resources/{}/versions/{}",
                    segment(id, "resource")?,
                    segment(version, "version")?
                ),
                Vec::new(),
            ),
            Endpoint::ResourceVersionDownload { id, version } => (
                format!(
                    "resources/{}/versions/{}/download",
                    segment(id, "resource")?,
                    segment(version, "version")?
                ),
                Vec::new(),
            ),
            Endpoint::ResourceAuthor { id } => {
                (format!("resources/{}/author", segment(id, "resource")?), Vec::new())
            }
            Endpoint::Categories => ("categories".to_string(), Vec::new()),
            Endpoint::Category { id } => (format!("categories/{}", segment(id, "category")?), Vec::new()),
            Endpoint::CategoryResources { id, size } => {
                (format!("categories/{}/resources", segment(id, "category")?), paged(size))
            }
            Endpoint::Authors { size } => ("authors".to_string(), paged(size)),
            Endpoint::Author { id } => (format!("authors/{}", segment(id, "author")?), Vec::new()),
            Endpoint::AuthorResources { id } => {
                (format!("authors/{}/resources", segment(id, "author")?), Vec::new())
            }
            Endpoint::NewAuthors { size } => ("authors/new".to_string(), paged(size)),
            Endpoint::SearchResources { query, field } => (
                format!("search/{}/{}", segment(query, "query")?, segment(field, "field")?),
                Vec::new(),
            ),
            Endpoint::SearchAuthors { query, field } => (
                format!(
                    "search/authors/{}/{}",
                    segment(query, "query")?,
                    segment(field, "field")?
                ),
                Vec::new(),
            ),
        };
        Ok(resolved)
    }
}

fn paged(size: Option<u32>) -> Vec<QueryParam> {
    vec![QueryParam::new("size", size.unwrap_or(DEFAULT_PAGE_SIZE))]
}

fn segment(value: &str, name: &'static str) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::MissingArgument(name));
    }
    if value == "." || value == ".." {
        return Err(ApiError::InvalidArgument(name));
    }
    Ok(encode_segment(value).into_owned())
}

impl SpigetClient {
    pub async fn fetch(&self, endpoint: Endpoint<'_>) -> Result<ApiResult, ApiError> {
        let (path, params) = endpoint.resolve()?;
        self.call(&path, &params).await
    }

    /// Callback form of `fetch`. Argument errors come back synchronously and
    /// no request is started.
    pub fn fetch_with_callback(
        &self,
        endpoint: Endpoint<'_>,
        callback: Option<Callback>,
    ) -> Result<JoinHandle<()>, ApiError> {
        let (path, params) = endpoint.resolve()?;
        self.call_with_callback(&path, &params, callback)
    }

    pub async fn get_resources(&self, size: Option<u32>) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::Resources { size }).await
    }

    pub async fn get_new_resources(&self, size: Option<u32>) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::NewResources { size }).await
    }

    /// `id` is a resource id or name.
    pub async fn get_resource(&self, id: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::Resource { id }).await
    }

    pub async fn get_resource_versions(&self, id: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::ResourceVersions { id }).await
    }

    pub async fn get_version_details(&self, id: &str, version: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::ResourceVersion { id, version }).await
    }

    pub async fn get_version_download(&self, id: &str, version: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::ResourceVersionDownload { id, version }).await
    }

    pub async fn get_resource_author(&self, id: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::ResourceAuthor { id }).await
    }

    pub async fn get_categories(&self) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::Categories).await
    }

    pub async fn get_category(&self, id: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::Category { id }).await
    }

    pub async fn get_category_resources(&self, id: &str, size: Option<u32>) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::CategoryResources { id, size }).await
    }

    pub async fn get_authors(&self, size: Option<u32>) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::Authors { size }).await
    }

    pub async fn get_author(&self, id: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::Author { id }).await
    }

    pub async fn get_author_resources(&self, id: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::AuthorResources { id }).await
    }

    pub async fn get_new_authors(&self, size: Option<u32>) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::NewAuthors { size }).await
    }

    pub async fn search_resources(&self, query: &str, field: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::SearchResources { query, field }).await
    }

    pub async fn search_authors(&self, query: &str, field: &str) -> Result<ApiResult, ApiError> {
        self.fetch(Endpoint::SearchAuthors { query, field }).await
    }
}
