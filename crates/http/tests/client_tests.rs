//! Integration tests for the Vyshivka API endpoints

mod common;

use common::*;
use serde_json::json;
use vyshivka_http::types::{Difficulty, RegisterRequest, SchemeFilter, SchemeWrite, Visibility};
use vyshivka_http::{ApiClient, ClientError, TokenStore};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn summary(id: u64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "main_image": null,
        "author": "masha",
        "category": "Рушники",
        "tags": ["цветы", "орнамент"],
        "difficulty": "ME",
        "views_count": 12,
        "created_at": "2024-03-01T10:00:00Z"
    })
}

fn scheme_detail(id: u64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "author": {"id": 1, "username": "masha", "email": "masha@example.com"},
        "description": "",
        "category": {"id": 3, "name": "Рушники", "slug": "rushnyky"},
        "tags": [{"id": 4, "name": "цветы", "slug": "flowers"}],
        "license": {
            "id": 2,
            "name": "Attribution 4.0",
            "short_name": "CC BY 4.0",
            "url": "https://creativecommons.org/licenses/by/4.0/"
        },
        "difficulty": "HA",
        "visibility": "UNL",
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_client_builder() {
    let client = ApiClient::builder()
        .base_url("http://localhost:8000/api/v1/")
        .build(TokenStore::in_memory());

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
    assert_eq!(
        client.url("/schemes/"),
        "http://localhost:8000/api/v1/schemes/"
    );
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = ApiClient::builder().build(TokenStore::in_memory());
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_scheme_list_sends_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/schemes/"))
        .and(query_param("search", "мак"))
        .and(query_param("difficulty", "hard"))
        .and(query_param("tags", "цветы,орнамент"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [summary(5, "Маки")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::builder()
        .base_url(server.uri())
        .build(TokenStore::in_memory())
        .unwrap();

    let filter = SchemeFilter {
        search: Some("мак".into()),
        difficulty: Some(Difficulty::Hard),
        tags: vec!["цветы".into(), "орнамент".into()],
        ..Default::default()
    };
    let page = client.list_schemes(&filter).await.unwrap();

    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].title, "Маки");
    assert_eq!(page.results[0].difficulty, Difficulty::Medium);
}

#[tokio::test]
async fn test_pagination_follows_links() {
    let server = MockServer::start().await;
    let next = format!("{}/schemes/?page=2", server.uri());

    Mock::given(method("GET"))
        .and(path("/schemes/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": format!("{}/schemes/", server.uri()),
            "results": [summary(2, "Подсолнухи")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::builder()
        .base_url(server.uri())
        .build(TokenStore::in_memory())
        .unwrap();

    let first: vyshivka_http::types::Paginated<vyshivka_http::types::SchemeSummary> =
        serde_json::from_value(json!({
            "count": 2,
            "next": next,
            "previous": null,
            "results": [summary(1, "Маки")]
        }))
        .unwrap();

    assert!(client.previous_page(&first).await.unwrap().is_none());

    let second = client.next_page(&first).await.unwrap().unwrap();
    assert_eq!(second.results[0].id, 2);
    assert!(client.next_page(&second).await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_rejects_mismatched_passwords_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/users/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::builder()
        .base_url(server.uri())
        .build(TokenStore::in_memory())
        .unwrap();

    let request = RegisterRequest {
        username: "masha".into(),
        email: "masha@example.com".into(),
        password: "hrestyk-2024".into(),
        re_password: "hrestyk-2025".into(),
    };
    let error = client.register(&request).await.unwrap_err();
    assert!(matches!(error, ClientError::BadRequest(_)));
}

#[tokio::test]
async fn test_register_is_anonymous_even_with_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/users/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9,
            "username": "masha",
            "email": "masha@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::builder()
        .base_url(server.uri())
        .build(store_with(&fresh_pair("R1")))
        .unwrap();

    let request = RegisterRequest {
        username: "masha".into(),
        email: "masha@example.com".into(),
        password: "hrestyk-2024".into(),
        re_password: "hrestyk-2024".into(),
    };
    let user = client.register(&request).await.unwrap();
    assert_eq!(user.id, 9);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_favorites_and_comments_are_authenticated() {
    let server = MockServer::start().await;
    let pair = fresh_pair("R1");
    let auth = bearer(&pair.access);

    Mock::given(method("POST"))
        .and(path("/schemes/5/favorite/"))
        .and(header("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/schemes/5/favorite/"))
        .and(header("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/schemes/5/comments/"))
        .and(header("authorization", auth.as_str()))
        .and(body_json(json!({"text": "Хорошая схема!"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 31,
            "author": "olena",
            "text": "Хорошая схема!",
            "created_at": "2024-03-02T08:30:00Z",
            "updated_at": "2024-03-02T08:30:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/comments/31/"))
        .and(header("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::builder()
        .base_url(server.uri())
        .build(store_with(&pair))
        .unwrap();

    client.add_favorite(5).await.unwrap();
    client.remove_favorite(5).await.unwrap();
    let comment = client.add_comment(5, "Хорошая схема!").await.unwrap();
    assert_eq!(comment.author, "olena");
    client.delete_comment(comment.id).await.unwrap();
}

#[tokio::test]
async fn test_error_statuses_map_to_client_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/schemes/404/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/schemes/7/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = ApiClient::builder()
        .base_url(server.uri())
        .build(store_with(&fresh_pair("R1")))
        .unwrap();

    let error = client.get_scheme(404).await.unwrap_err();
    assert!(matches!(error, ClientError::NotFound(_)));
    assert!(!error.is_session_expired());

    let error = client.delete_scheme(7).await.unwrap_err();
    assert_eq!(error.status(), Some(403));
}

#[tokio::test]
async fn test_scheme_create_and_update_send_authenticated_bodies() {
    let server = MockServer::start().await;
    let pair = fresh_pair("R1");
    let auth = bearer(&pair.access);

    let mut scheme = SchemeWrite {
        title: "Маки в поле".into(),
        category: Some(3),
        tags: vec![4],
        license: 2,
        difficulty: Difficulty::Hard,
        size_stitches_width: Some(120),
        visibility: Visibility::Unlisted,
        ..Default::default()
    };

    Mock::given(method("POST"))
        .and(path("/schemes/"))
        .and(header("authorization", auth.as_str()))
        .and(body_json(json!({
            "title": "Маки в поле",
            "description": "",
            "category": 3,
            "tags": [4],
            "license": 2,
            "difficulty": "HA",
            "size_stitches_width": 120,
            "recommended_canvas": "",
            "recommended_threads": "",
            "visibility": "UNL"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(scheme_detail(14, "Маки в поле")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/schemes/14/"))
        .and(header("authorization", auth.as_str()))
        .and(body_json(json!({
            "title": "Маки на рассвете",
            "description": "",
            "tags": [],
            "license": 2,
            "difficulty": "HA",
            "size_stitches_width": 120,
            "recommended_canvas": "",
            "recommended_threads": "",
            "visibility": "UNL"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(scheme_detail(14, "Маки на рассвете")))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::builder()
        .base_url(server.uri())
        .build(store_with(&pair))
        .unwrap();

    let created = client.create_scheme(&scheme).await.unwrap();
    assert_eq!(created.id, 14);
    assert_eq!(created.license.short_name, "CC BY 4.0");

    scheme.title = "Маки на рассвете".into();
    scheme.category = None;
    scheme.tags.clear();
    let updated = client.update_scheme(created.id, &scheme).await.unwrap();
    assert_eq!(updated.title, "Маки на рассвете");
    assert_eq!(updated.visibility, Visibility::Unlisted);
}
