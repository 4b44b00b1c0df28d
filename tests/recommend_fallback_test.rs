use gaehwa::core::recommend::{
    fallback_florists, RecipientForm, RecommendationOrigin, FALLBACK_NOTICE,
};
use gaehwa::domain::model::{AgeBracket, Emotion, Gender};
use gaehwa::{HttpRecommendationClient, Recommender, Settings};
use httpmock::prelude::*;

fn settings_for(url: String) -> Settings {
    Settings {
        backend_url: url,
        timeout_seconds: 2,
        ..Settings::default()
    }
}

fn form() -> RecipientForm {
    RecipientForm {
        gender: Some(Gender::Female),
        age: Some(AgeBracket::new(20).unwrap()),
        emotion: Some(Emotion::Joy),
    }
}

#[tokio::test]
async fn test_live_recommendations_are_mapped() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/recommend/florists")
            .json_body(serde_json::json!({
                "recipient_gender": "여",
                "recipient_age": "20대",
                "emotion": "기쁨"
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "florists": [
                    {"id": "a1", "name": "튤립살롱", "rating": 4.5, "tags": ["미니멀"], "imageUrl": "https://img/a1.png"},
                    {"name": "해바라기숍"}
                ]
            }));
    });

    let client = HttpRecommendationClient::new(&settings_for(server.base_url())).unwrap();
    let result = Recommender::new(client).recommend(&form()).await.unwrap();

    api_mock.assert();
    assert_eq!(result.origin, RecommendationOrigin::Live);
    assert_eq!(result.florists.len(), 2);
    assert_eq!(result.florists[0].id, "a1");
    assert_eq!(result.florists[0].rating, Some(4.5));
    assert_eq!(result.florists[0].image_url.as_deref(), Some("https://img/a1.png"));
    assert_eq!(result.florists[1].id, "f1");
    assert_eq!(result.florists[1].rating, Some(4.8));
}

#[tokio::test]
async fn test_server_error_uses_sample_list_without_notice() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/recommend/florists");
        then.status(500).body("boom");
    });

    let client = HttpRecommendationClient::new(&settings_for(server.base_url())).unwrap();
    let result = Recommender::new(client).recommend(&form()).await.unwrap();

    api_mock.assert();
    assert_eq!(result.florists, fallback_florists());
    assert_eq!(result.notice(), None);
}

#[tokio::test]
async fn test_empty_list_uses_sample_list_without_notice() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/recommend/florists");
        then.status(200).json_body(serde_json::json!({"florists": []}));
    });

    let client = HttpRecommendationClient::new(&settings_for(server.base_url())).unwrap();
    let result = Recommender::new(client).recommend(&form()).await.unwrap();

    assert!(result.is_fallback());
    assert_eq!(result.florists.len(), 3);
    assert_eq!(result.notice(), None);
}

#[tokio::test]
async fn test_non_json_body_uses_sample_list_with_notice() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/recommend/florists");
        then.status(200).body("<html>not json</html>");
    });

    let client = HttpRecommendationClient::new(&settings_for(server.base_url())).unwrap();
    let result = Recommender::new(client).recommend(&form()).await.unwrap();

    assert_eq!(result.florists, fallback_florists());
    assert_eq!(result.notice(), Some(FALLBACK_NOTICE));
}

#[tokio::test]
async fn test_oddly_typed_fields_keep_live_result() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/recommend/florists");
        then.status(200).json_body(serde_json::json!({
            "florists": [{"id": "a1", "name": "튤립", "tags": "oops", "rating": "4.5"}]
        }));
    });

    let client = HttpRecommendationClient::new(&settings_for(server.base_url())).unwrap();
    let result = Recommender::new(client).recommend(&form()).await.unwrap();

    assert_eq!(result.origin, RecommendationOrigin::Live);
    assert_eq!(result.florists.len(), 1);
    assert_eq!(result.florists[0].id, "a1");
    assert_eq!(result.florists[0].rating, Some(4.5));
    assert!(result.florists[0].tags.is_empty());
}

#[tokio::test]
async fn test_transport_error_uses_sample_list_with_notice() {
    // 先取得一個確定沒有人在聽的位址
    let url = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = HttpRecommendationClient::new(&settings_for(url)).unwrap();
    let result = Recommender::new(client).recommend(&form()).await.unwrap();

    assert_eq!(result.florists.len(), 3);
    assert_eq!(result.florists, fallback_florists());
    assert_eq!(result.notice(), Some(FALLBACK_NOTICE));
}
