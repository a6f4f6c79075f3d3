//! End-to-end store flows against a mock API server

use plinth_api::{ApiClient, ApiConfig, Session, TokenPair};
use plinth_document::Node;
use plinth_store::blog::BlogStore;
use plinth_store::work::{WorkEvent, WorkStore};
use plinth_store::{AuthStore, PostDraft, RequestStatus, SettingsStore, StoreError};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with(server: &MockServer, session: Session) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(
        ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        },
        session,
    ))
}

fn signed_in() -> Session {
    Session::with_tokens(TokenPair {
        access_token: "access-token".to_string(),
        refresh_token: "refresh-token".to_string(),
    })
}

fn post_json(id: Uuid, title: &str, slug: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "slug": slug,
        "excerpt": null,
        "content": {"type": "doc", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Body"}]}]},
        "content_html": "<p>Body</p>",
        "cover_image_url": null,
        "status": status,
        "published_at": null,
        "created_at": "2024-02-28T09:30:00Z",
        "updated_at": "2024-03-01T12:00:00Z",
        "tags": []
    })
}

fn featured_json(id: Uuid, slug: &str, sort_order: i32) -> serde_json::Value {
    let mut body = post_json(id, slug, slug, "published");
    body["sort_order"] = json!(sort_order);
    body
}

#[tokio::test]
async fn test_draft_save_then_publish() {
    let created_id = Uuid::parse_str("5bd9f9c2-7a55-4c2f-9b19-cc2dd03148a1").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blog/admin/posts"))
        .and(body_partial_json(json!({
            "title": "Trail Notes",
            "slug": "trail-notes",
            "status": "draft"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(post_json(created_id, "Trail Notes", "trail-notes", "draft")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/blog/admin/posts/{}/publish", created_id)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(post_json(
                created_id,
                "Trail Notes",
                "trail-notes",
                "published",
            )),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut blog = BlogStore::new(client_with(&server, signed_in()));

    let mut draft = PostDraft::new();
    draft.set_title("Trail Notes");
    draft.edit_body(|blocks| {
        blocks.push(Node::paragraph(vec![Node::text("Body")]));
    });

    let saved = blog.save_draft(&draft).await.unwrap();
    assert_eq!(saved.id, created_id);
    assert_eq!(blog.state().admin_items.len(), 1);

    blog.publish_post(created_id).await.unwrap();
    assert_eq!(
        blog.state().admin_items[0].status,
        plinth_api::blog::PostStatus::Published
    );
}

#[tokio::test]
async fn test_empty_draft_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    let mut blog = BlogStore::new(client_with(&server, signed_in()));

    let err = blog.save_draft(&PostDraft::new()).await.unwrap_err();
    assert_eq!(
        err,
        StoreError::Invalid("Title and slug are required".to_string())
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_login_sets_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let session = Session::new();
    let mut auth = AuthStore::new(client_with(&server, session.clone()));

    let err = auth.login("admin@example.test", "wrong").await.unwrap_err();
    assert_eq!(err, StoreError::Unauthorized);
    assert_eq!(auth.state().status, RequestStatus::Failed);
    assert_eq!(auth.state().error.as_deref(), Some("Invalid credentials"));
    assert!(!auth.state().is_authenticated);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_expired_session_surfaces_unauthorized_and_clears_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/admin/posts"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .mount(&server)
        .await;

    let session = signed_in();
    let mut blog = BlogStore::new(client_with(&server, session.clone()));

    let err = blog.fetch_admin_posts().await.unwrap_err();
    assert_eq!(err, StoreError::Unauthorized);
    assert_eq!(blog.state().status, RequestStatus::Failed);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_add_featured_post_renumbers_in_one_put() {
    let experience_id = Uuid::parse_str("7f7f86a4-2f5d-43c0-9db3-1f1a4a5f2b10").unwrap();
    let first = Uuid::parse_str("5bd9f9c2-7a55-4c2f-9b19-cc2dd03148a1").unwrap();
    let second = Uuid::parse_str("80d9b1d0-07a1-4a82-9d25-4f6321c5a2bb").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!(
            "/work/admin/experiences/{}/featured-posts",
            experience_id
        )))
        .and(body_json(json!({
            "posts": [
                {"post_id": first, "sort_order": 0},
                {"post_id": second, "sort_order": 1}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"experience_id": experience_id, "post_id": first, "sort_order": 0},
            {"experience_id": experience_id, "post_id": second, "sort_order": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/work/admin/experiences/{}/featured-posts",
            experience_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            featured_json(first, "first-post", 0),
            featured_json(second, "second-post", 1)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut work = WorkStore::new(client_with(&server, signed_in()));
    let seeded: Vec<plinth_api::work::FeaturedPost> =
        serde_json::from_value(json!([featured_json(first, "first-post", 0)])).unwrap();
    work.apply(WorkEvent::FeaturedPostsLoaded { posts: seeded });

    work.add_featured_post(experience_id, second).await.unwrap();

    assert_eq!(work.state().featured_posts.len(), 2);
    assert_eq!(work.state().featured_posts[1].post.slug, "second-post");
}

#[tokio::test]
async fn test_already_featured_post_is_rejected_without_network() {
    let experience_id = Uuid::parse_str("7f7f86a4-2f5d-43c0-9db3-1f1a4a5f2b10").unwrap();
    let first = Uuid::parse_str("5bd9f9c2-7a55-4c2f-9b19-cc2dd03148a1").unwrap();

    let server = MockServer::start().await;
    let mut work = WorkStore::new(client_with(&server, signed_in()));
    let seeded: Vec<plinth_api::work::FeaturedPost> =
        serde_json::from_value(json!([featured_json(first, "first-post", 0)])).unwrap();
    work.apply(WorkEvent::FeaturedPostsLoaded { posts: seeded });

    let err = work
        .add_featured_post(experience_id, first)
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::Invalid("Post already featured".to_string()));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_settings_update_replaces_store_data() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/settings/admin"))
        .and(body_json(json!({"hero_tagline": "Run far"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "hero_tagline": "Run far"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = SettingsStore::new(client_with(&server, signed_in()));
    let saved = settings
        .update_settings(&plinth_api::settings::SiteSettings {
            hero_tagline: Some("Run far".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(saved.hero_tagline.as_deref(), Some("Run far"));
    assert_eq!(
        settings.state().data.hero_tagline.as_deref(),
        Some("Run far")
    );
}

#[tokio::test]
async fn test_server_failure_collapses_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/posts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stack trace detail"))
        .mount(&server)
        .await;

    let mut blog = BlogStore::new(client_with(&server, Session::new()));
    let err = blog
        .fetch_page(&plinth_api::blog::PostListOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err, StoreError::Failed("Failed to fetch posts".to_string()));
    assert_eq!(blog.state().error.as_deref(), Some("Failed to fetch posts"));
    assert_eq!(blog.state().status, RequestStatus::Failed);
}
