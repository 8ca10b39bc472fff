#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::sync::{Arc, Mutex};

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vidtube_api::{
    ApiClient, Credentials, Error, FilePart, LikeTarget, PlaylistDraft, TransportConfig,
    UploadProgress, VideoDraft, VideoQuery,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
    let client = ApiClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "statusCode": 200, "data": data, "message": "ok", "success": true })
}

fn password() -> SecretString {
    SecretString::from("hunter2".to_owned())
}

// ── Session tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_login_sets_cookie_replayed_on_later_requests() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/login"))
        .and(body_json(json!({ "username": "ana", "password": "hunter2" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "accessToken=abc123; Path=/; HttpOnly")
                .set_body_json(envelope(json!({
                    "user": { "_id": "u1", "username": "ana", "avatar": "a.png" },
                    "accessToken": "abc123"
                }))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/current-user"))
        .and(header("cookie", "accessToken=abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "_id": "u1", "username": "ana" }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let user = client
        .login(&Credentials::username("ana", password()))
        .await
        .unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.avatar.as_deref(), Some("a.png"));
    assert_eq!(
        client.http().cookie_header().as_deref(),
        Some("accessToken=abc123")
    );

    let current = client.current_user().await.unwrap();
    assert_eq!(current.username, "ana");
}

#[tokio::test]
async fn test_login_failure_carries_backend_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/login"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "statusCode": 404,
            "message": "User does not exist",
            "success": false
        })))
        .mount(&server)
        .await;

    let result = client.login(&Credentials::username("ghost", password())).await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "User does not exist");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_reported_not_handled() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized request"
        })))
        .mount(&server)
        .await;

    let result = client.current_user().await;

    match result {
        Err(ref e @ Error::Unauthorized { ref message }) => {
            assert!(e.is_unauthorized());
            assert_eq!(message, "Unauthorized request");
        }
        other => panic!("expected Unauthorized, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_logout_tolerates_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await.unwrap();
}

// ── Video tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_videos_sends_query_and_reads_nested_list() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/videos"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "videos": [
                { "_id": "v1", "title": "First", "views": 3 },
                { "_id": "v2", "title": "Second", "isPublished": false }
            ],
            "page": 1,
            "totalPages": 4
        }))))
        .mount(&server)
        .await;

    let feed = client.list_videos(&VideoQuery::page(1, 10)).await.unwrap();

    assert_eq!(feed.videos.len(), 2);
    assert_eq!(feed.videos[0].views, 3);
    assert!(feed.videos[0].is_published);
    assert!(!feed.videos[1].is_published);
    assert_eq!(feed.total_pages, Some(4));
}

#[tokio::test]
async fn test_get_video_reads_first_element() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/videos/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "_id": "v1",
            "title": "Clip",
            "likesCount": 5,
            "isLiked": false,
            "owner": { "_id": "u9", "username": "chef" },
            "createdAt": "2024-06-15T10:30:00.000Z"
        }]))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/videos/missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let video = client.get_video("v1").await.unwrap().unwrap();
    assert_eq!(video.likes_count, 5);
    assert_eq!(video.owner.as_ref().and_then(|o| o.username()), Some("chef"));
    assert!(video.created_at.is_some());

    assert!(client.get_video("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_publish_video_reports_progress_to_completion() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "_id": "new1", "title": "Upload" }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = VideoDraft {
        title: "Upload".into(),
        description: "desc".into(),
        video_file: FilePart::new("clip.mp4", "video/mp4", vec![7u8; 200 * 1024]),
        thumbnail: FilePart::new("thumb.png", "image/png", vec![1u8; 1024]),
    };

    let seen: Arc<Mutex<Vec<UploadProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let video = client
        .publish_video(
            &draft,
            Some(Arc::new(move |p| sink.lock().unwrap().push(p))),
        )
        .await
        .unwrap();

    assert_eq!(video.id, "new1");
    let seen = seen.lock().unwrap();
    assert!(seen.len() > 1, "expected several progress reports");
    assert!(seen.windows(2).all(|w| w[0].sent <= w[1].sent));
    assert_eq!(seen.last().unwrap().percent(), 100);
}

// ── Comment tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_video_comments_extracts_nested_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/comments/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "comments": [{ "_id": "c1", "content": "nice" }]
        }))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/comments/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!("unexpected"))))
        .mount(&server)
        .await;

    let comments = client.video_comments("v1", None, None).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "nice");

    let none = client.video_comments("v2", None, None).await.unwrap();
    assert!(none.is_empty());
}

// ── Channel tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_path_segments_escape_spaces_and_plus() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/c/john%20doe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "_id": "u7", "username": "john doe", "subscribersCount": 3
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/subscriptions/c/a%2Bb"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "isSubscribed": true }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let profile = client.channel_profile("john doe").await.unwrap();
    assert_eq!(profile.username, "john doe");
    assert_eq!(profile.subscribers_count, 3);

    let sub = client.toggle_subscription("a+b").await.unwrap();
    assert_eq!(sub.state, Some(true));
}

// ── Toggle tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_endpoints_address_entity_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/likes/toggle/t/tw1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/subscriptions/c/chef"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "isSubscribed": true }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let like = client.toggle_like(LikeTarget::Tweet, "tw1").await.unwrap();
    assert_eq!(like.state, None);

    let sub = client.toggle_subscription("chef").await.unwrap();
    assert_eq!(sub.state, Some(true));
}

// ── Playlist tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_playlist_lifecycle_paths() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/playlists"))
        .and(body_json(json!({ "name": "Later", "description": "watch later" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({
            "_id": "p1", "name": "Later", "description": "watch later", "videos": []
        }))))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/playlists/add/v1/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/playlists/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .mount(&server)
        .await;

    let created = client
        .create_playlist(&PlaylistDraft {
            name: "Later".into(),
            description: "watch later".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "p1");

    client.add_video_to_playlist("v1", "p1").await.unwrap();
    assert!(client.get_playlist("gone").await.unwrap().is_none());
}

#[tokio::test]
async fn test_dashboard_videos_non_array_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard/videos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "videos": "none" }))),
        )
        .mount(&server)
        .await;

    assert!(client.channel_videos().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_transport_failure_is_transport_error() {
    let base_url = Url::parse("http://127.0.0.1:9/api/v1").unwrap();
    let client = ApiClient::new(base_url, &TransportConfig::default()).unwrap();

    let err = client.healthcheck().await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got: {err:?}");
    assert_eq!(err.status(), None);
}

// ── Upload file tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_file_part_from_path_guesses_mime() {
    let dir = tempfile::tempdir().unwrap();
    let clip = dir.path().join("clip.mp4");
    std::fs::write(&clip, vec![0u8; 2048]).unwrap();

    let part = FilePart::from_path(&clip).await.unwrap();
    assert_eq!(part.file_name, "clip.mp4");
    assert_eq!(part.mime, "video/mp4");
    assert_eq!(part.len(), 2048);

    let missing = FilePart::from_path(dir.path().join("nope.png")).await;
    assert!(matches!(missing, Err(Error::Io(_))));
}
