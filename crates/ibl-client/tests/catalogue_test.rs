#![allow(clippy::unwrap_used)] // unwrap is fine in tests
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)] // no doc comments needed in tests

use std::sync::Mutex;

use anyhow::Result;
use ibl_client::{
    AsCallback, ClientOptions, Endpoint, IblClient, LocalHttpDelegate, Payload, QueryOptions,
    TransportError, register_callback,
};
use serde_json::{Value, json};
use url::Url;

/// Matches when the request's query string is exactly `pairs`, in order.
struct ExactQuery(Vec<(String, String)>);

impl wiremock::Match for ExactQuery {
    fn matches(&self, request: &wiremock::Request) -> bool {
        let pairs: Vec<(String, String)> = request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        pairs == self.0
    }
}

fn exact_query(pairs: &[(&str, &str)]) -> ExactQuery {
    ExactQuery(
        pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect(),
    )
}

fn client_for(mock_server: &wiremock::MockServer) -> IblClient {
    let options = ClientOptions {
        base_url: format!("{}/ibl/v1", mock_server.uri()),
        user_agent: Some(String::from("test/0.0.0")),
        ..ClientOptions::default()
    };
    IblClient::from_options(&options).unwrap()
}

fn page_envelope(count: u64, page: u64, per_page: u64) -> Value {
    json!({
        "count": count,
        "page": page,
        "per_page": per_page,
        "programmes": [{ "id": format!("p{page}") }]
    })
}

/// Delegate that records URLs and answers every request with a fixed envelope.
struct RecordingDelegate {
    urls: Mutex<Vec<String>>,
    response: Value,
}

impl LocalHttpDelegate for RecordingDelegate {
    async fn get(&self, url: &Url, query: &[(String, String)]) -> Result<Value> {
        let mut full = url.clone();
        if !query.is_empty() {
            full.query_pairs_mut().extend_pairs(query);
        }
        self.urls.lock().unwrap().push(full.to_string());
        Ok(self.response.clone())
    }
}

#[tokio::test]
async fn test_query_string_mirrors_options_exactly() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/ibl/v1/categories/wales/highlights"))
        .and(exact_query(&[
            ("rights", "tv"),
            ("mixin", "promotions"),
            ("sort", "title"),
            ("sort_direction", "asc"),
        ]))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(json!({ "category_highlights": { "elements": [] } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server);
    let options = QueryOptions::new()
        .with("rights", "tv")
        .with("mixin", "promotions")
        .with("sort", "title")
        .with("sort_direction", "asc");

    // Act
    let payload = client
        .get_category_highlights("wales", &options)
        .await
        .unwrap();

    // Assert
    assert_eq!(payload, Payload::Value(json!({ "elements": [] })));
}

#[tokio::test]
async fn test_auto_pagination_two_pages_not_flattened() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    for page in 1..=2u64 {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/ibl/v1/programmes/b006q2x0"))
            .and(exact_query(&[("per_page", "2"), ("page", &page.to_string())]))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(page_envelope(3, page, 2)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }
    let client = client_for(&mock_server);
    let options = QueryOptions::new()
        .with("per_page", 2)
        .with_auto_paginate(true);

    // Act
    let payload = client.get_programmes("b006q2x0", &options).await.unwrap();

    // Assert
    assert_eq!(
        payload,
        Payload::Pages(vec![page_envelope(3, 1, 2), page_envelope(3, 2, 2)])
    );
}

#[tokio::test]
async fn test_auto_pagination_default_page_size() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/ibl/v1/categories/wales/programmes"))
        .and(exact_query(&[("page", "1"), ("per_page", "20")]))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!({
            "category_programmes": { "count": 1, "page": 1, "per_page": 20, "elements": [] }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server);

    // Act
    let payload = client
        .get_category_programmes("wales", &QueryOptions::new().with_auto_paginate(true))
        .await
        .unwrap();

    // Assert
    assert_eq!(payload.pages().unwrap().len(), 1);
}

#[tokio::test]
async fn test_auto_pagination_aborts_when_second_page_fails() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::query_param("page", "1"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(page_envelope(6, 1, 2)))
        .expect(1)
        .mount(&mock_server)
        .await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::query_param("page", "2"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::query_param("page", "3"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(page_envelope(6, 3, 2)))
        .expect(0)
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server);
    let options = QueryOptions::new()
        .with("per_page", 2)
        .with_auto_paginate(true);

    // Act
    let result = client.get_programme_episodes("b006q2x0", &options).await;

    // Assert
    let err = result.unwrap_err();
    assert_eq!(
        err.downcast_ref::<TransportError>().unwrap().status(),
        Some(500)
    );
}

#[tokio::test]
async fn test_server_error_reaches_callback() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/ibl/v1/channels"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server);
    let mut callback_error = None;

    // Act
    let result = register_callback(
        client.get_channels(None),
        Some(|r: Result<&Payload, &anyhow::Error>| {
            callback_error = r.err().map(ToString::to_string);
        }),
    )
    .await;

    // Assert
    assert!(result.is_err());
    assert!(callback_error.unwrap().contains("HTTP 500"));
}

#[tokio::test]
async fn test_home_highlights_callback_and_future_agree() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    let body = include_str!("../../../fixtures/ibl/home_highlights.json");
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/ibl/v1/home/highlights"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server);
    let mut from_callback = None;

    // Act
    let from_future = client
        .get_home_highlights(&QueryOptions::new())
        .as_callback(|r| from_callback = r.ok().cloned())
        .await
        .unwrap();

    // Assert
    let envelope: Value = serde_json::from_str(body).unwrap();
    assert_eq!(from_future, Payload::Value(envelope["home_highlights"].clone()));
    assert_eq!(from_callback, Some(from_future));
}

#[tokio::test]
async fn test_custom_delegate_receives_joined_urls() {
    // Arrange
    let delegate = RecordingDelegate {
        urls: Mutex::new(Vec::new()),
        response: json!({ "episodes": [] }),
    };
    let client = IblClient::with_delegate(delegate).unwrap();

    // Act
    client
        .get_episodes(vec!["p2", "p1"], &QueryOptions::new().with("rights", "web"))
        .await
        .unwrap();
    client
        .fetch(Endpoint::Categories, Some("comedy"), &QueryOptions::new())
        .await
        .unwrap();

    // Assert
    let urls = client.request().delegate().urls.lock().unwrap().clone();
    assert_eq!(
        urls,
        vec![
            String::from("http://ibl.api.bbci.co.uk/ibl/v1/episodes/p2,p1?rights=web"),
            String::from("http://ibl.api.bbci.co.uk/ibl/v1/categories/comedy"),
        ]
    );
}

#[tokio::test]
async fn test_decode_into_caller_types() {
    // Arrange
    #[derive(Debug, serde::Deserialize)]
    struct Channel {
        id: String,
        has_schedule: bool,
    }

    let mock_server = wiremock::MockServer::start().await;
    let body = include_str!("../../../fixtures/ibl/channels.json");
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/ibl/v1/channels"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server);

    // Act
    let channels: Vec<Channel> = client
        .get_channels(None)
        .await
        .unwrap()
        .decode()
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(channels.len(), 3);
    assert_eq!(channels[1].id, "bbc_three");
    assert!(!channels[1].has_schedule);
}
