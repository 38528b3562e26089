use nexus_gateway::{GatewayError, NewComment, NewPost, NexusClient, SortKey};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post_row(id: i64, title: &str, upvotes: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": "build log",
        "image_url": null,
        "car_make": null,
        "car_model": null,
        "car_year": null,
        "upvotes": upvotes,
        "created_at": "2024-05-01T12:00:00+00:00",
    })
}

#[tokio::test]
async fn list_newest_orders_by_creation_time_descending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([post_row(2, "Swapped GT86", 1), post_row(1, "NA Miata", 5)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = NexusClient::new(server.uri(), "test-key");
    let posts = client.list_posts(SortKey::Newest).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Swapped GT86");
}

#[tokio::test]
async fn list_popular_orders_by_upvotes_descending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .and(query_param("order", "upvotes.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            post_row(3, "Nine", 9),
            post_row(1, "Five", 5),
            post_row(2, "One", 1),
        ])))
        .mount(&server)
        .await;

    let client = NexusClient::new(server.uri(), "test-key");
    let posts = client.list_posts(SortKey::Popular).await.unwrap();

    let upvotes: Vec<i64> = posts.iter().map(|p| p.upvotes).collect();
    assert_eq!(upvotes, vec![9, 5, 1]);
}

#[tokio::test]
async fn missing_post_maps_to_not_found() {
    let server = MockServer::start().await;

    // Zero rows under the single-object Accept header come back as 406.
    Mock::given(method("GET"))
        .and(path("/rest/v1/posts"))
        .and(query_param("id", "eq.99"))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "message": "JSON object requested, multiple (or no) rows returned",
        })))
        .mount(&server)
        .await;

    let client = NexusClient::new(server.uri(), "test-key");
    let err = client.get_post(99).await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn create_post_returns_created_row_with_default_upvotes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/posts"))
        .and(header("Prefer", "return=representation"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([post_row(10, "Turbo Civic", 0)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = NexusClient::new(server.uri(), "test-key");
    let created = client
        .create_post(NewPost {
            title: "Turbo Civic".into(),
            ..NewPost::default()
        })
        .await
        .unwrap();

    assert_eq!(created.id, 10);
    assert_eq!(created.title, "Turbo Civic");
    assert_eq!(created.upvotes, 0);
}

#[tokio::test]
async fn upvote_writes_incremented_count() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/posts"))
        .and(query_param("id", "eq.4"))
        .and(body_json(json!({ "upvotes": 6 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_row(4, "NA Miata", 6)))
        .expect(1)
        .mount(&server)
        .await;

    let client = NexusClient::new(server.uri(), "test-key");
    let updated = client.upvote_post(4, 5).await.unwrap();

    assert_eq!(updated.upvotes, 6);
}

#[tokio::test]
async fn delete_post_removes_comments_then_the_post() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/comments"))
        .and(query_param("post_id", "eq.7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/posts"))
        .and(query_param("id", "eq.7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = NexusClient::new(server.uri(), "test-key");
    client.delete_post(7).await.unwrap();
}

#[tokio::test]
async fn whitespace_comment_is_rejected_without_a_request() {
    let server = MockServer::start().await;

    let client = NexusClient::new(server.uri(), "test-key");
    let err = client
        .add_comment(NewComment {
            post_id: 1,
            content: "   \n\t ".into(),
        })
        .await
        .unwrap_err();

    assert!(err.is_empty_comment());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_content_is_trimmed_before_submission() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/comments"))
        .and(body_json(json!({ "post_id": 7, "content": "nice build" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": 31,
            "post_id": 7,
            "content": "nice build",
            "created_at": "2024-05-02T09:30:00+00:00",
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = NexusClient::new(server.uri(), "test-key");
    let comment = client
        .add_comment(NewComment {
            post_id: 7,
            content: "  nice build  ".into(),
        })
        .await
        .unwrap();

    assert_eq!(comment.content, "nice build");
    assert_eq!(comment.post_id, 7);
}

#[tokio::test]
async fn gateway_failure_carries_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/posts"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "invalid input syntax for type integer",
        })))
        .mount(&server)
        .await;

    let client = NexusClient::new(server.uri(), "test-key");
    let err = client.upvote_post(1, 0).await.unwrap_err();

    match err {
        GatewayError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "invalid input syntax for type integer");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
