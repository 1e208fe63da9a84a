use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

const DEFAULT_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: u32,
    pub name: String,
    pub release_date: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: u32,
    pub name: String,
    pub tag: String,
    pub author_id: u32,
    pub category_id: u32,
    pub versions: Vec<Version>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Download {
    pub url: String,
}

/// Read-only catalog served by the mock. Ids ascend in publication order,
/// so "new" listings are the highest ids first.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub resources: Vec<Resource>,
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn sample() -> Self {
        let version = |id, name: &str, release_date| Version {
            id,
            name: name.to_string(),
            release_date,
        };
        let resource = |id, name: &str, tag: &str, author_id, category_id, versions| Resource {
            id,
            name: name.to_string(),
            tag: tag.to_string(),
            author_id,
            category_id,
            versions,
        };
        Self {
            resources: vec![
                resource(
                    123,
                    "WorldEdit",
                    "In-game map editor",
                    1,
                    10,
                    vec![version(7, "6.1", 1_420_070_400), version(8, "7.0", 1_546_300_800)],
                ),
                resource(200, "Essentials", "Core server commands", 2, 11, vec![version(9, "2.17", 1_500_000_000)]),
                resource(301, "WorldGuard", "Protect regions of your world", 1, 10, vec![version(12, "7.0.4", 1_600_000_000)]),
                resource(450, "BuildTools Helper", "Build faster", 3, 10, Vec::new()),
            ],
            authors: vec![
                Author { id: 1, name: "sk89q".to_string() },
                Author { id: 2, name: "essentialsx".to_string() },
                Author { id: 3, name: "builder".to_string() },
            ],
            categories: vec![
                Category { id: 10, name: "tools".to_string() },
                Category { id: 11, name: "admin".to_string() },
            ],
        }
    }

    fn resource(&self, key: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| matches_key(key, r.id, &r.name))
    }

    fn author(&self, key: &str) -> Option<&Author> {
        self.authors.iter().find(|a| matches_key(key, a.id, &a.name))
    }

    fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| matches_key(key, c.id, &c.name))
    }
}

/// Entities are addressable by numeric id or exact name.
fn matches_key(key: &str, id: u32, name: &str) -> bool {
    key.parse::<u32>().map(|k| k == id).unwrap_or(false) || key == name
}

pub type Db = Arc<Catalog>;

#[derive(Deserialize)]
pub struct Paging {
    pub size: Option<usize>,
}

impl Paging {
    fn size(&self) -> usize {
        self.size.unwrap_or(DEFAULT_SIZE)
    }
}

pub fn app() -> Router {
    app_with(Catalog::sample())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    Router::new()
        .route("/v1/resources", get(list_resources))
        .route("/v1/resources/new", get(new_resources))
        .route("/v1/resources/{id}", get(get_resource))
        .route("/v1/resources/{id}/versions", get(resource_versions))
        .route("/v1/resources/{id}/versions/{version}", get(resource_version))
        .route("/v1/resources/{id}/versions/{version}/download", get(version_download))
        .route("/v1/resources/{id}/author", get(resource_author))
        .route("/v1/categories", get(list_categories))
        .route("/v1/categories/{id}", get(get_category))
        .route("/v1/categories/{id}/resources", get(category_resources))
        .route("/v1/authors", get(list_authors))
        .route("/v1/authors/new", get(new_authors))
        .route("/v1/authors/{id}", get(get_author))
        .route("/v1/authors/{id}/resources", get(author_resources))
        .route("/v1/search/{query}/{field}", get(search_resources))
        .route("/v1/search/authors/{query}/{field}", get(search_authors))
        .fallback(unknown_route)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("{what} not found")).into_response()
}

async fn unknown_route() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html("<html><body><h1>404 Not Found</h1></body></html>"),
    )
        .into_response()
}

async fn list_resources(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<Vec<Resource>> {
    Json(db.resources.iter().take(paging.size()).cloned().collect())
}

async fn new_resources(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<Vec<Resource>> {
    let mut resources = db.resources.clone();
    resources.sort_by(|a, b| b.id.cmp(&a.id));
    resources.truncate(paging.size());
    Json(resources)
}

async fn get_resource(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.resource(&id) {
        Some(resource) => Json(resource.clone()).into_response(),
        None => not_found("resource"),
    }
}

async fn resource_versions(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.resource(&id) {
        Some(resource) => Json(resource.versions.clone()).into_response(),
        None => not_found("resource"),
    }
}

fn find_version<'a>(resource: &'a Resource, key: &str) -> Option<&'a Version> {
    resource.versions.iter().find(|v| matches_key(key, v.id, &v.name))
}

async fn resource_version(State(db): State<Db>, Path((id, version)): Path<(String, String)>) -> Response {
    let Some(resource) = db.resource(&id) else {
        return not_found("resource");
    };
    match find_version(resource, &version) {
        Some(version) => Json(version.clone()).into_response(),
        None => not_found("version"),
    }
}

async fn version_download(State(db): State<Db>, Path((id, version)): Path<(String, String)>) -> Response {
    let Some(resource) = db.resource(&id) else {
        return not_found("resource");
    };
    match find_version(resource, &version) {
        Some(version) => Json(Download {
            url: format!("https://cdn.example.org/resources/{}/versions/{}.jar", resource.id, version.id),
        })
        .into_response(),
        None => not_found("version"),
    }
}

async fn resource_author(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let Some(resource) = db.resource(&id) else {
        return not_found("resource");
    };
    match db.authors.iter().find(|a| a.id == resource.author_id) {
        Some(author) => Json(author.clone()).into_response(),
        None => not_found("author"),
    }
}

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    Json(db.categories.clone())
}

async fn get_category(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.category(&id) {
        Some(category) => Json(category.clone()).into_response(),
        None => not_found("category"),
    }
}

async fn category_resources(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(paging): Query<Paging>,
) -> Response {
    let Some(category) = db.category(&id) else {
        return not_found("category");
    };
    let resources: Vec<Resource> = db
        .resources
        .iter()
        .filter(|r| r.category_id == category.id)
        .take(paging.size())
        .cloned()
        .collect();
    Json(resources).into_response()
}

async fn list_authors(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<Vec<Author>> {
    Json(db.authors.iter().take(paging.size()).cloned().collect())
}

async fn new_authors(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<Vec<Author>> {
    let mut authors = db.authors.clone();
    authors.sort_by(|a, b| b.id.cmp(&a.id));
    authors.truncate(paging.size());
    Json(authors)
}

async fn get_author(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.author(&id) {
        Some(author) => Json(author.clone()).into_response(),
        None => not_found("author"),
    }
}

async fn author_resources(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let Some(author) = db.author(&id) else {
        return not_found("author");
    };
    let resources: Vec<Resource> = db.resources.iter().filter(|r| r.author_id == author.id).cloned().collect();
    Json(resources).into_response()
}

async fn search_resources(State(db): State<Db>, Path((query, field)): Path<(String, String)>) -> Response {
    let query = query.to_lowercase();
    let hits: Vec<Resource> = match field.as_str() {
        "name" => db.resources.iter().filter(|r| r.name.to_lowercase().contains(&query)).cloned().collect(),
        "tag" => db.resources.iter().filter(|r| r.tag.to_lowercase().contains(&query)).cloned().collect(),
        _ => return (StatusCode::BAD_REQUEST, format!("unsupported search field: {field}")).into_response(),
    };
    Json(hits).into_response()
}

async fn search_authors(State(db): State<Db>, Path((query, field)): Path<(String, String)>) -> Response {
    if field != "username" {
        return (StatusCode::BAD_REQUEST, format!("unsupported search field: {field}")).into_response();
    }
    let query = query.to_lowercase();
    let hits: Vec<Author> = db.authors.iter().filter(|a| a.name.to_lowercase().contains(&query)).cloned().collect();
    Json(hits).into_response()
}
