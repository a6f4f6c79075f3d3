//! Gateway integration tests against a mock API server

use plinth_api::blog::{PostListOptions, PostStatus};
use plinth_api::upload::UploadFile;
use plinth_api::work::FeaturedPostRef;
use plinth_api::{ApiClient, ApiConfig, ApiError, Session, TokenPair};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with(server: &MockServer, session: Session) -> ApiClient {
    ApiClient::new(
        ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        },
        session,
    )
}

fn signed_in() -> Session {
    Session::with_tokens(TokenPair {
        access_token: "access-token".to_string(),
        refresh_token: "refresh-token".to_string(),
    })
}

fn post_body(id: Uuid, title: &str, slug: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "slug": slug,
        "status": status,
        "created_at": "2024-02-28T09:30:00Z",
        "updated_at": "2024-03-01T12:00:00Z",
        "tags": []
    })
}

#[tokio::test]
async fn test_bearer_token_attached_when_signed_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/admin/posts"))
        .and(header("authorization", "Bearer access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let posts = client.list_admin_posts().await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_no_bearer_token_when_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_with(&server, Session::new());
    client.list_tags().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|request| !request.headers.contains_key("authorization")));
}

#[tokio::test]
async fn test_unauthorized_response_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/admin/posts"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .mount(&server)
        .await;

    let session = signed_in();
    let client = client_with(&server, session.clone());
    let err = client.list_admin_posts().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!session.is_authenticated());
    assert_eq!(session.tokens(), None);
}

#[tokio::test]
async fn test_missing_resource_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/posts/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Post not found"})))
        .mount(&server)
        .await;

    let client = client_with(&server, Session::new());
    let err = client.get_post("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_with(&server, Session::new());
    match client.get_settings().await.unwrap_err() {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_mismatched_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": "nope"})))
        .mount(&server)
        .await;

    let client = client_with(&server, Session::new());
    let err = client
        .list_posts(&PostListOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Json(_)));
}

#[tokio::test]
async fn test_list_posts_sends_pagination_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/posts"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "5"))
        .and(query_param("tag", "training"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [post_body(Uuid::nil(), "Summit Report", "summit-report", "published")],
            "total": 11,
            "page": 2,
            "per_page": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, Session::new());
    let page = client
        .list_posts(&PostListOptions {
            page: Some(2),
            per_page: Some(5),
            tag: Some("training".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(page.total, 11);
    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.posts[0].status, PostStatus::Published);
}

#[tokio::test]
async fn test_login_stores_token_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(
            json!({"email": "admin@example.test", "password": "hunter2"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-access",
            "refresh_token": "fresh-refresh"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"user": {"sub": "user-1", "email": "admin@example.test"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new();
    let client = client_with(&server, session.clone());

    client.login("admin@example.test", "hunter2").await.unwrap();
    assert_eq!(
        session.tokens(),
        Some(TokenPair {
            access_token: "fresh-access".to_string(),
            refresh_token: "fresh-refresh".to_string(),
        })
    );

    let user = client.me().await.unwrap();
    assert_eq!(user.sub, "user-1");
}

#[tokio::test]
async fn test_failed_login_clears_session_and_reports_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let session = signed_in();
    let client = client_with(&server, session.clone());
    let err = client.login("admin@example.test", "wrong").await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_replace_featured_posts_sends_wrapped_body() {
    let experience_id = Uuid::parse_str("7f7f86a4-2f5d-43c0-9db3-1f1a4a5f2b10").unwrap();
    let post_id = Uuid::parse_str("5bd9f9c2-7a55-4c2f-9b19-cc2dd03148a1").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!(
            "/work/admin/experiences/{}/featured-posts",
            experience_id
        )))
        .and(body_json(json!({
            "posts": [{"post_id": post_id, "sort_order": 0}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"experience_id": experience_id, "post_id": post_id, "sort_order": 0}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let links = client
        .replace_featured_posts(
            experience_id,
            &[FeaturedPostRef {
                post_id,
                sort_order: 0,
            }],
        )
        .await
        .unwrap();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].post_id, post_id);
}

#[tokio::test]
async fn test_publish_uses_patch_verb() {
    let id = Uuid::parse_str("5bd9f9c2-7a55-4c2f-9b19-cc2dd03148a1").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("/blog/admin/posts/{}/publish", id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(post_body(id, "Summit Report", "summit-report", "published")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let post = client.publish_post(id).await.unwrap();
    assert_eq!(post.status, PostStatus::Published);
}

#[tokio::test]
async fn test_upload_sends_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/blog-image"))
        .and(query_param("folder", "content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://cdn.example.test/content/cover.jpg",
            "path": "content/cover.jpg"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let uploaded = client
        .upload_blog_image(
            UploadFile {
                file_name: "cover.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: b"jpeg-bytes".to_vec(),
            },
            Some("content"),
        )
        .await
        .unwrap();
    assert_eq!(uploaded.path, "content/cover.jpg");

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"cover.jpg\""));
    assert!(body.contains("jpeg-bytes"));
}

#[tokio::test]
async fn test_blog_upload_defaults_folder_to_covers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/blog-image"))
        .and(query_param("folder", "covers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://cdn.example.test/covers/cover.jpg",
            "path": "covers/cover.jpg"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    client
        .upload_blog_image(
            UploadFile {
                file_name: "cover.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: b"jpeg-bytes".to_vec(),
            },
            None,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_returns_acknowledgement() {
    let id = Uuid::parse_str("5bd9f9c2-7a55-4c2f-9b19-cc2dd03148a1").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/blog/admin/posts/{}", id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Post deleted successfully"})),
        )
        .mount(&server)
        .await;

    let client = client_with(&server, signed_in());
    let ack = client.delete_post(id).await.unwrap();
    assert_eq!(ack.message, "Post deleted successfully");
}
