//! 语义扩充集成测试
//!
//! 使用 wiremock 模拟语义服务

use emotext_core::lexicon::{
    EmotionCategory, HttpSemanticClient, Lexicon, LexiconCache, LexiconEnricher,
    LexiconRepository, SemanticSource,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_service(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/words"))
        .and(body_partial_json(json!({ "sememe": "POS" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "words": ["振奋"] })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/words"))
        .and(body_partial_json(json!({ "sememe": "NEG" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "words": ["忧虑"] })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/word_semantic"))
        .and(body_partial_json(json!({ "word": "振奋" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "synonyms": ["鼓舞人心"],
            "hypernyms": ["积极情绪", "状态"]
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/word_semantic"))
        .and(body_partial_json(json!({ "word": "忧虑" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "synonyms": ["担忧"],
            "antonyms": ["放心"]
        })))
        .mount(server)
        .await;
}

fn client(server: &MockServer, timeout: Duration) -> HttpSemanticClient {
    HttpSemanticClient::new(server.uri(), Some("test-key".to_string()), timeout).unwrap()
}

#[tokio::test]
async fn test_client_sends_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/words"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "words": ["喜悦"] })))
        .expect(1)
        .mount(&server)
        .await;

    let words = client(&server, Duration::from_secs(5))
        .emotion_words("POS")
        .await
        .unwrap();
    assert_eq!(words, vec!["喜悦"]);
}

#[tokio::test]
async fn test_enricher_extends_builtin() {
    let server = MockServer::start().await;
    mount_service(&server).await;

    let enricher = LexiconEnricher::new(
        Arc::new(client(&server, Duration::from_secs(5))),
        Duration::from_secs(5),
    );
    let lexicon = enricher.fetch_latest_dictionary().await.unwrap();

    let confidence = lexicon.terms(EmotionCategory::Confidence);
    assert!(confidence.contains(&"鼓舞人心".to_string()));
    assert!(confidence.contains(&"积极情绪".to_string()));
    assert!(!lexicon.contains("状态"));
    assert!(lexicon.terms(EmotionCategory::Challenge).contains(&"担忧".to_string()));
    assert!(!lexicon.contains("放心"));

    // 扩充只增不减
    for category in EmotionCategory::ALL {
        for term in Lexicon::builtin().terms(category) {
            assert!(lexicon.terms(category).contains(term));
        }
    }
    assert_eq!(enricher.cache().len(), 2);
}

#[tokio::test]
async fn test_repository_uses_enrichment_when_bundled_missing() {
    let server = MockServer::start().await;
    mount_service(&server).await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let repository = LexiconRepository::new(
        LexiconCache::new(cache_path.clone(), chrono::Duration::hours(24)),
        dir.path().join("positive.txt"),
        dir.path().join("degree.txt"),
    )
    .with_enricher(LexiconEnricher::new(
        Arc::new(client(&server, Duration::from_secs(5))),
        Duration::from_secs(5),
    ));

    let lexicon = repository.initialize().await;
    assert!(lexicon.contains("鼓舞人心"));
    assert!(cache_path.exists());
}

#[tokio::test]
async fn test_slow_service_falls_back_to_builtin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "words": ["振奋"] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let repository = LexiconRepository::new(
        LexiconCache::new(dir.path().join("cache.json"), chrono::Duration::hours(24)),
        dir.path().join("positive.txt"),
        dir.path().join("degree.txt"),
    )
    .with_enricher(LexiconEnricher::new(
        Arc::new(client(&server, Duration::from_millis(200))),
        Duration::from_millis(200),
    ));

    let lexicon = repository.initialize().await;
    assert_eq!(*lexicon, Lexicon::builtin());
}

#[tokio::test]
async fn test_service_errors_fall_back_to_builtin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let repository = LexiconRepository::new(
        LexiconCache::new(cache_path.clone(), chrono::Duration::hours(24)),
        dir.path().join("positive.txt"),
        dir.path().join("degree.txt"),
    )
    .with_enricher(LexiconEnricher::new(
        Arc::new(client(&server, Duration::from_secs(5))),
        Duration::from_secs(5),
    ));

    // 每个义原都返回错误状态：视为扩充失败，退回未经处理的默认词典且不写缓存
    assert_eq!(repository.fetch_latest_dictionary().await, Lexicon::builtin());

    let lexicon = repository.initialize().await;
    assert_eq!(*lexicon, Lexicon::builtin());
    assert!(lexicon.negation().contains(&"不".to_string()));
    assert!(!cache_path.exists());
}
