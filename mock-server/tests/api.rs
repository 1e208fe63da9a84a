use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Author, Catalog, Category, Download, Resource, Version};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn get(uri: &str) -> axum::response::Response {
    app()
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap()
}

// --- resources ---

#[tokio::test]
async fn list_resources_honours_size() {
    let resp = get("/v1/resources?size=2").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resources: Vec<Resource> = body_json(resp).await;
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].name, "WorldEdit");
}

#[tokio::test]
async fn list_resources_defaults_to_ten() {
    let mut catalog = Catalog::sample();
    let template = catalog.resources[0].clone();
    catalog.resources = (1..=15)
        .map(|id| Resource {
            id,
            name: format!("Plugin{id}"),
            ..template.clone()
        })
        .collect();

    let resp = app_with(catalog)
        .oneshot(Request::builder().uri("/v1/resources").body(String::new()).unwrap())
        .await
        .unwrap();
    let resources: Vec<Resource> = body_json(resp).await;
    assert_eq!(resources.len(), 10);
}

#[tokio::test]
async fn new_resources_are_newest_first() {
    let resp = get("/v1/resources/new?size=2").await;
    let resources: Vec<Resource> = body_json(resp).await;
    let ids: Vec<u32> = resources.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![450, 301]);
}

#[tokio::test]
async fn resource_by_name_and_id() {
    let by_name: Resource = body_json(get("/v1/resources/WorldEdit").await).await;
    let by_id: Resource = body_json(get("/v1/resources/123").await).await;
    assert_eq!(by_name, by_id);
}

#[tokio::test]
async fn unknown_resource_is_plain_text_404() {
    let resp = get("/v1/resources/Nope").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await, "resource not found");
}

#[tokio::test]
async fn resource_versions_and_details() {
    let versions: Vec<Version> = body_json(get("/v1/resources/123/versions").await).await;
    assert_eq!(versions.len(), 2);

    let version: Version = body_json(get("/v1/resources/123/versions/8").await).await;
    assert_eq!(version.name, "7.0");

    let resp = get("/v1/resources/123/versions/999").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn version_download_link() {
    let download: Download = body_json(get("/v1/resources/123/versions/7/download").await).await;
    assert!(download.url.ends_with("/resources/123/versions/7.jar"));
}

#[tokio::test]
async fn resource_author() {
    let author: Author = body_json(get("/v1/resources/WorldGuard/author").await).await;
    assert_eq!(author.name, "sk89q");
}

// --- categories ---

#[tokio::test]
async fn categories() {
    let categories: Vec<Category> = body_json(get("/v1/categories").await).await;
    assert_eq!(categories.len(), 2);

    let category: Category = body_json(get("/v1/categories/tools").await).await;
    assert_eq!(category.id, 10);

    let resources: Vec<Resource> = body_json(get("/v1/categories/tools/resources?size=2").await).await;
    assert_eq!(resources.len(), 2);
    assert!(resources.iter().all(|r| r.category_id == 10));
}

// --- authors ---

#[tokio::test]
async fn authors() {
    let authors: Vec<Author> = body_json(get("/v1/authors?size=5").await).await;
    assert_eq!(authors.len(), 3);

    let newest: Vec<Author> = body_json(get("/v1/authors/new?size=1").await).await;
    assert_eq!(newest[0].name, "builder");

    let author: Author = body_json(get("/v1/authors/sk89q").await).await;
    assert_eq!(author.id, 1);

    let resources: Vec<Resource> = body_json(get("/v1/authors/1/resources").await).await;
    let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["WorldEdit", "WorldGuard"]);
}

// --- search ---

#[tokio::test]
async fn search_resources_by_name_and_tag() {
    let hits: Vec<Resource> = body_json(get("/v1/search/world/name").await).await;
    assert_eq!(hits.len(), 2);

    let hits: Vec<Resource> = body_json(get("/v1/search/build/tag").await).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 450);
}

#[tokio::test]
async fn search_with_encoded_query() {
    let hits: Vec<Resource> = body_json(get("/v1/search/BuildTools%20Helper/name").await).await;
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn search_rejects_unknown_field() {
    let resp = get("/v1/search/world/colour").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = get("/v1/search/authors/sk/name").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_authors_by_username() {
    let hits: Vec<Author> = body_json(get("/v1/search/authors/SK89/username").await).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "sk89q");
}

// --- fallback ---

#[tokio::test]
async fn unknown_route_is_html_404() {
    let resp = get("/v2/anything").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let body = body_bytes(resp).await;
    assert!(body.starts_with(b"<html>"));
}
