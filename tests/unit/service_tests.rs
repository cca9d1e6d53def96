/*!
 * Tests for translation service dispatch behavior
 */

use std::sync::Arc;

use tradux::providers::mock::{MockBackend, mapping_table};
use tradux::{FailurePolicy, Token, TranslationConfig, TranslationService};

use crate::common::lang;

fn service_with(backend: MockBackend) -> TranslationService {
    TranslationService::new(Arc::new(backend))
}

#[tokio::test]
async fn test_translatePhrase_calledTwice_shouldHitBackendOnce() {
    let backend = MockBackend::suffix();
    let service = service_with(backend.clone());
    let (dest, src) = (lang("fr"), lang("en"));

    let first = service.translate_phrase("Hello", &dest, &src).await.unwrap();
    let second = service.translate_phrase("Hello", &dest, &src).await.unwrap();

    assert_eq!(first, "Hello [fr]");
    assert_eq!(second, first);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_translatePhrase_withDifferentDestinations_shouldMissSeparately() {
    let backend = MockBackend::suffix();
    let service = service_with(backend.clone());
    let src = lang("en");

    service.translate_phrase("Hello", &lang("fr"), &src).await.unwrap();
    service.translate_phrase("Hello", &lang("de"), &src).await.unwrap();

    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_translateTokens_shouldKeepSpansAndFillCache() {
    let backend = MockBackend::mappings(mapping_table([("Hi", "sw", "Habari")]));
    let service = service_with(backend);
    let tokens = vec![Token::new(0, 2, "Hi")];

    let translated = service
        .translate_tokens(&tokens, &lang("sw"), &lang("en"))
        .await
        .unwrap();

    assert_eq!(translated, vec![Token::new(0, 2, "Habari")]);
    assert_eq!(service.cache().get("Hi", "sw"), Some("Habari".to_string()));
}

#[tokio::test]
async fn test_translatePhrase_withFailingBackend_shouldFallBackToOriginal() {
    let backend = MockBackend::failing();
    let service = service_with(backend.clone());

    let result = service
        .translate_phrase("Hello", &lang("fr"), &lang("en"))
        .await
        .unwrap();
    assert_eq!(result, "Hello");

    // The fallback is cached by default, so the backend is not retried.
    service.translate_phrase("Hello", &lang("fr"), &lang("en")).await.unwrap();
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_translatePhrase_withCacheFailuresDisabled_shouldRetry() {
    let backend = MockBackend::failing();
    let mut config = TranslationConfig::default();
    config.cache_failures = false;
    let service = TranslationService::with_config(Arc::new(backend.clone()), config);

    service.translate_phrase("Hello", &lang("fr"), &lang("en")).await.unwrap();
    service.translate_phrase("Hello", &lang("fr"), &lang("en")).await.unwrap();

    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_translatePhrase_withPropagatePolicy_shouldSurfaceError() {
    let backend = MockBackend::failing();
    let mut config = TranslationConfig::default();
    config.failure_policy = FailurePolicy::Propagate;
    let service = TranslationService::with_config(Arc::new(backend), config);

    let result = service.translate_phrase("Hello", &lang("fr"), &lang("en")).await;
    assert!(result.is_err());
    // Nothing is cached on a propagated failure.
    assert!(service.cache().get("Hello", "fr").is_none());
}

#[tokio::test]
async fn test_translatePhrase_withCacheDisabled_shouldAlwaysCallBackend() {
    let backend = MockBackend::suffix();
    let mut config = TranslationConfig::default();
    config.cache_enabled = false;
    let service = TranslationService::with_config(Arc::new(backend.clone()), config);

    service.translate_phrase("Hello", &lang("fr"), &lang("en")).await.unwrap();
    service.translate_phrase("Hello", &lang("fr"), &lang("en")).await.unwrap();

    assert_eq!(backend.calls(), 2);
    assert!(service.cache().is_empty());
}

#[tokio::test]
async fn test_translateBatch_shouldTranslateAllAndFillCache() {
    let backend = MockBackend::suffix();
    let service = service_with(backend.clone());
    let phrases = vec!["one".to_string(), "two".to_string(), "three".to_string()];

    let out = service
        .translate_batch(&phrases, &lang("de"), &lang("en"))
        .await
        .unwrap();

    assert_eq!(out, vec!["one [de]", "two [de]", "three [de]"]);
    assert_eq!(service.cache().get("two", "de"), Some("two [de]".to_string()));
}

#[tokio::test]
async fn test_translateBatch_withWarmCache_shouldOnlySendMisses() {
    let backend = MockBackend::suffix();
    let service = service_with(backend.clone());
    let (dest, src) = (lang("de"), lang("en"));

    service.cache().set("one", "de", "eins");
    let phrases = vec!["one".to_string(), "two".to_string()];

    let out = service.translate_batch(&phrases, &dest, &src).await.unwrap();

    assert_eq!(out, vec!["eins", "two [de]"]);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_translateBatch_withFailingBackend_shouldFallBackToOriginals() {
    let backend = MockBackend::failing();
    let service = service_with(backend);
    let phrases = vec!["one".to_string(), "two".to_string()];

    let out = service
        .translate_batch(&phrases, &lang("de"), &lang("en"))
        .await
        .unwrap();

    assert_eq!(out, phrases);
}

#[tokio::test]
async fn test_scoped_shouldOverrideUntilGuardDrops() {
    let backend = MockBackend::suffix();
    let service = service_with(backend.clone());
    let (dest, src) = (lang("fr"), lang("en"));

    {
        let _guard = service.scoped(|cfg| cfg.cache_enabled = false);
        service.translate_phrase("Hello", &dest, &src).await.unwrap();
        service.translate_phrase("Hello", &dest, &src).await.unwrap();
        assert_eq!(backend.calls(), 2);
    }

    // Caching is back: one more backend call, then hits.
    service.translate_phrase("Hello", &dest, &src).await.unwrap();
    service.translate_phrase("Hello", &dest, &src).await.unwrap();
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn test_sharedCache_shouldServeSecondService() {
    let first = service_with(MockBackend::suffix());
    first.translate_phrase("Hello", &lang("fr"), &lang("en")).await.unwrap();

    let backend = MockBackend::failing();
    let second = TranslationService::new(Arc::new(backend.clone()))
        .with_cache(first.cache().clone());

    let out = second.translate_phrase("Hello", &lang("fr"), &lang("en")).await.unwrap();
    assert_eq!(out, "Hello [fr]");
    assert_eq!(backend.calls(), 0);
}
