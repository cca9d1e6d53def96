/*!
 * End-to-end pipeline tests: tokenize, dispatch, reassemble
 */

use std::sync::Arc;

use tradux::providers::mock::{MockBackend, mapping_table};
use tradux::{TranslationService, reassemble, tokenize};

use crate::common::{init_logging, lang, random_strings};

#[test]
fn test_roundTrip_withIdentityPhrases_shouldReproduceAnyInput() {
    init_logging();
    for source in random_strings(50, 10, 80) {
        let tokens = tokenize(&source);
        let rebuilt = reassemble(&source, &tokens).unwrap();
        assert_eq!(rebuilt, source, "round trip broke for {:?}", source);
    }
}

#[tokio::test]
async fn test_translateMessage_withEchoBackend_shouldReproduceAnyInput() {
    let service = TranslationService::new(Arc::new(MockBackend::echo()));
    let dest = lang("fr");

    for source in random_strings(30, 10, 60) {
        let out = service.translate_message(&source, &dest).await.unwrap();
        assert_eq!(out, source, "identity translation broke for {:?}", source);
    }
}

#[tokio::test]
async fn test_translateMessage_shouldPreserveBoundaryCharacters() {
    let service = TranslationService::new(Arc::new(MockBackend::echo()));
    let source = "I shall never! **let them buy their wedding**.";

    let out = service.translate_message(source, &lang("de")).await.unwrap();

    assert_eq!(out, source);
}

#[tokio::test]
async fn test_translateMessage_shouldSubstitutePhrasesInPlace() {
    let backend = MockBackend::mappings(mapping_table([("Hi", "sw", "Habari")]));
    let service = TranslationService::new(Arc::new(backend));

    let out = service
        .translate_message("Hi, **Hi**!", &lang("sw"))
        .await
        .unwrap();

    assert_eq!(out, "Habari, **Habari**!");
}

#[tokio::test]
async fn test_translateMessage_withRepeatedPhrases_shouldCallBackendOncePerPhrase() {
    let backend = MockBackend::suffix();
    let service = TranslationService::new(Arc::new(backend.clone()));

    // Three tokens, two distinct phrases.
    service
        .translate_message("again **again** different", &lang("fr"))
        .await
        .unwrap();

    assert_eq!(backend.calls(), 2);

    // A second identical message is served entirely from the cache.
    service
        .translate_message("again **again** different", &lang("fr"))
        .await
        .unwrap();
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_translateMessage_shouldLeaveEscapedSpansAlone() {
    let service = TranslationService::new(Arc::new(MockBackend::suffix()));
    let source = "translate \u{200b}but not this\u{200b} please";

    let out = service.translate_message(source, &lang("fr")).await.unwrap();

    assert!(out.contains("\u{200b}but not this\u{200b}"));
    assert!(out.contains("translate [fr]"));
    assert!(out.contains("please [fr]"));
}

#[tokio::test]
async fn test_translateMessage_shouldLeaveMentionsAndFencesIntact() {
    let service = TranslationService::new(Arc::new(MockBackend::suffix()));
    let source = "Ask <@999> about it:\n```py\nprint('hi')\n```";

    let out = service.translate_message(source, &lang("de")).await.unwrap();

    assert!(out.contains("<@999>"));
    assert!(out.starts_with("Ask"));
    assert!(out.contains("```py\n"));
    assert!(out.ends_with("```"));
}

#[tokio::test]
async fn test_translateMessage_withFailingBackend_shouldPassTextThrough() {
    let service = TranslationService::new(Arc::new(MockBackend::failing()));
    let source = "nothing **works** today?";

    let out = service.translate_message(source, &lang("fr")).await.unwrap();

    assert_eq!(out, source);
}

#[tokio::test]
async fn test_concurrentInvocations_shouldShareCacheSafely() {
    let backend = MockBackend::suffix();
    let service = Arc::new(TranslationService::new(Arc::new(backend.clone())));
    let dest = lang("fr");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        let dest = dest.clone();
        handles.push(tokio::spawn(async move {
            service.translate_message("shared **phrase** here", &dest).await
        }));
    }

    for handle in handles {
        let out = handle.await.unwrap().unwrap();
        assert_eq!(out, "shared [fr] **phrase [fr]** here [fr]");
    }

    // Redundant concurrent misses are allowed, but the cache must have
    // settled on one value per phrase.
    assert_eq!(service.cache().get("shared", "fr"), Some("shared [fr]".to_string()));
}

#[tokio::test]
async fn test_tokenOrdering_holdsForRandomInputs() {
    for source in random_strings(50, 5, 60) {
        let tokens = tokenize(&source);
        for pair in tokens.windows(2) {
            assert!(
                pair[0].end <= pair[1].start,
                "overlapping tokens for {:?}",
                source
            );
        }
    }
}
