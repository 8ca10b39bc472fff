#![allow(clippy::unwrap_used)]
// Integration tests for page controllers.

mod common;

use std::time::Duration;

use serde_json::json;
use vidtube_api::FilePart;
use vidtube_core::{
    ChannelPage, ChannelStudio, CommentThread, CoreError, ErrorKind, HomeFeed, PlaylistDetail,
    PlaylistLibrary, ToggleOutcome, UploadForm, VideoPlayer, VideoUpload,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{envelope, failure, setup, sign_in};

fn video_json(id: &str) -> serde_json::Value {
    json!({ "_id": id, "title": format!("Video {id}"), "likesCount": 1, "isLiked": false })
}

// ── Home ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_home_feed_requests_first_page_of_ten() {
    let (server, ctx, _nav) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/videos"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "videos": [video_json("a"), video_json("b")]
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let mut home = HomeFeed::new(&ctx);
    let videos = home.load().await.unwrap();

    assert_eq!(videos.len(), 2);
    assert_eq!(home.page(), 1);
}

#[tokio::test]
async fn test_closed_view_discards_late_result() {
    let (server, ctx, _nav) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "videos": [video_json("late")] })))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut home = HomeFeed::new(&ctx);
    let closer = home.scope().closer();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        closer.cancel();
    });

    let err = home.load().await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(home.videos().is_empty());
}

// ── Video player ────────────────────────────────────────────────────

#[tokio::test]
async fn test_video_player_missing_video_is_not_found() {
    let (server, ctx, _nav) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/videos/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let mut player = VideoPlayer::new(&ctx, "gone");
    let err = player.load().await.unwrap_err();

    assert!(matches!(err, CoreError::NotFound { .. }));
    assert!(player.video().is_none());
}

#[tokio::test]
async fn test_video_player_like_patches_snapshot() {
    let (server, ctx, _nav) = setup().await;
    sign_in(&server, &ctx).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/videos/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "_id": "v1", "title": "Clip", "likesCount": 5, "isLiked": false
        }]))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/likes/toggle/v/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .mount(&server)
        .await;

    let mut player = VideoPlayer::new(&ctx, "v1");
    player.load().await.unwrap();
    let outcome = player.toggle_like().await.unwrap();

    assert!(matches!(outcome, ToggleOutcome::Applied(_)));
    let video = player.video().unwrap();
    assert!(video.is_liked);
    assert_eq!(video.likes_count, 6);
}

#[tokio::test]
async fn test_save_to_playlist_validates_selection() {
    let (server, ctx, _nav) = setup().await;
    sign_in(&server, &ctx).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/playlists/user/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "p1", "name": "Faves", "videos": ["v1"] },
            { "_id": "p2", "name": "Later", "videos": [] }
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/playlists/add/v1/p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let mut player = VideoPlayer::new(&ctx, "v1");

    let none = player.save_to_playlist(1).await.unwrap_err();
    assert_eq!(none.to_string(), "You have no playlists. Create one first.");

    assert_eq!(player.load_playlists().await.unwrap().len(), 2);

    for bad in [0, 3] {
        let err = player.save_to_playlist(bad).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid playlist selection");
    }

    let dup = player.save_to_playlist(1).await.unwrap_err();
    assert_eq!(dup.kind(), ErrorKind::Validation);
    assert_eq!(dup.to_string(), "Video already exists in this playlist");

    let saved = player.save_to_playlist(2).await.unwrap();
    assert_eq!(saved.name, "Later");
    assert!(saved.contains("v1"));
}

// ── Channel ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_channel_loads_profile_then_tweets() {
    let (server, ctx, _nav) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/c/chef"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "_id": "ch1",
            "username": "chef",
            "subscribersCount": 7,
            "isSubscribedToMe": true,
            "videos": [video_json("a")]
        }))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tweets/user/ch1"))
        .respond_with(failure(500, "tweets unavailable"))
        .mount(&server)
        .await;

    let mut channel = ChannelPage::new(&ctx, "chef");
    let profile = channel.load().await.unwrap();

    assert_eq!(profile.subscribers_count, 7);
    assert!(profile.is_subscribed);
    assert_eq!(channel.videos().len(), 1);
    assert!(channel.tweets().is_empty());
    let state = channel.subscribe().unwrap().state();
    assert!(state.active);
    assert_eq!(state.count, Some(7));
}

// ── Comments ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_comment_thread_add_edit_delete() {
    let (server, ctx, _nav) = setup().await;
    sign_in(&server, &ctx).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/comments/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "comments": [{
                "_id": "c1",
                "content": "first",
                "owner": { "_id": "u1", "username": "ana" },
                "likesCount": 2
            }]
        }))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/comments/v1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({
            "_id": "c2", "content": "second"
        }))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/comments/c/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "_id": "c1", "content": "edited", "video": "v1", "owner": "u1"
        }))))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/comments/c/c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .mount(&server)
        .await;

    let mut thread = CommentThread::new(&ctx, "v1");
    assert_eq!(thread.load().await.unwrap().len(), 1);

    let blank = thread.add("   ").await.unwrap_err();
    assert_eq!(blank.kind(), ErrorKind::Validation);

    assert_eq!(thread.add("second").await.unwrap().id, "c2");
    let order: Vec<&str> = thread.comments().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["c2", "c1"]);

    thread.edit("c1", " edited ").await.unwrap();
    let edited = &thread.comments()[1];
    assert_eq!(edited.video.as_deref(), Some("v1"));
    assert_eq!(edited.likes_count, 2);
    assert_eq!(edited.owner.as_ref().and_then(|o| o.username()), Some("ana"));

    thread.delete("c2").await.unwrap();

    let contents: Vec<&str> = thread.comments().iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["edited"]);
    assert!(thread.like("c2").is_none());
}

#[tokio::test]
async fn test_comment_thread_malformed_payload_is_empty() {
    let (server, ctx, _nav) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/comments/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "docs": [] }))))
        .mount(&server)
        .await;

    let mut thread = CommentThread::new(&ctx, "v1");
    assert!(thread.load().await.unwrap().is_empty());
}

// ── Playlists ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_playlist_detail_fails_whole_batch() {
    let (server, ctx, _nav) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/playlists/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "_id": "p1", "name": "Mix", "videos": ["A", "B", "C"]
        }))))
        .mount(&server)
        .await;
    for id in ["A", "C"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/videos/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([video_json(id)]))))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/v1/videos/B"))
        .respond_with(failure(500, "Video lookup failed"))
        .mount(&server)
        .await;

    let mut detail = PlaylistDetail::new(&ctx, "p1");
    let err = detail.load().await.unwrap_err();

    match err {
        CoreError::BatchFailed { total, ref source } => {
            assert_eq!(total, 3);
            assert_eq!(source.to_string(), "Video lookup failed");
        }
        other => panic!("expected BatchFailed, got: {other:?}"),
    }
    assert!(detail.videos().is_empty());
    assert!(detail.playlist().is_none());
}

#[tokio::test]
async fn test_playlist_detail_resolves_every_video() {
    let (server, ctx, _nav) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/playlists/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "_id": "p1", "name": "Mix", "videos": [{ "_id": "A" }, "B"]
        }))))
        .mount(&server)
        .await;
    for id in ["A", "B"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/videos/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([video_json(id)]))))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut detail = PlaylistDetail::new(&ctx, "p1");
    let ids: Vec<String> = detail
        .load()
        .await
        .unwrap()
        .iter()
        .map(|v| v.id.clone())
        .collect();

    assert_eq!(ids, vec!["A", "B"]);
}

#[tokio::test]
async fn test_playlist_library_requires_session() {
    let (_server, ctx, _nav) = setup().await;

    let mut library = PlaylistLibrary::new(&ctx);
    let err = library.load().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authorization);
}

#[tokio::test]
async fn test_playlist_library_create_and_delete() {
    let (server, ctx, _nav) = setup().await;
    sign_in(&server, &ctx).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/playlists/user/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/playlists"))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({
            "_id": "p9", "name": "New", "description": "", "videos": []
        }))))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/playlists/p9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let mut library = PlaylistLibrary::new(&ctx);
    library.load().await.unwrap();
    assert_eq!(library.create("New", "").await.unwrap().id, "p9");
    library.delete("p9").await.unwrap();

    assert!(library.playlists().is_empty());
}

// ── Upload ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_reports_progress_and_returns_id() {
    let (server, ctx, _nav) = setup().await;
    sign_in(&server, &ctx).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/videos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({
            "_id": "fresh", "title": "Trip"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let upload = VideoUpload::new(&ctx);
    let progress = upload.progress();
    let id = upload
        .submit(UploadForm {
            title: "Trip".into(),
            description: "Holiday clip".into(),
            video_file: Some(FilePart::new("trip.mp4", "video/mp4", vec![0u8; 300 * 1024])),
            thumbnail: Some(FilePart::new("trip.png", "image/png", vec![0u8; 2048])),
        })
        .await
        .unwrap();

    assert_eq!(id, "fresh");
    assert_eq!(*progress.borrow(), 100);
}

#[tokio::test]
async fn test_incomplete_upload_never_reaches_backend() {
    let (server, ctx, _nav) = setup().await;
    sign_in(&server, &ctx).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = VideoUpload::new(&ctx)
        .submit(UploadForm {
            title: "Trip".into(),
            ..UploadForm::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

// ── Studio ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_studio_publish_toggle_refetches_videos() {
    let (server, ctx, _nav) = setup().await;
    sign_in(&server, &ctx).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "totalVideos": 1, "totalViews": 40
        }))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "v1", "title": "Mine", "isPublished": true }
        ]))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "v1", "title": "Mine", "isPublished": false }
        ]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/videos/toggle/publish/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let mut studio = ChannelStudio::new(&ctx);
    studio.load().await.unwrap();
    assert_eq!(studio.stats().total_views, 40);

    studio.toggle_publish("v1").await.unwrap();

    assert!(!studio.videos()[0].is_published);
    assert!(!studio.publish_toggle("v1").unwrap().state().active);
}
