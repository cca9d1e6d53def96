/*!
 * Tests for cache persistence stores
 */

use tempfile::TempDir;
use tradux::{CacheStore, JsonFileStore, NoopStore, TranslationCache};

#[tokio::test]
async fn test_jsonFileStore_saveThenLoad_shouldRoundTrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("translations.json");
    let store = JsonFileStore::new(&path);

    let cache = TranslationCache::new();
    cache.set("hello", "fr", "bonjour");
    cache.set("hello", "es", "hola");
    store.save(&cache).await.unwrap();

    let restored = TranslationCache::new();
    store.load(&restored).await.unwrap();

    assert_eq!(restored.get("hello", "fr"), Some("bonjour".to_string()));
    assert_eq!(restored.get("hello", "es"), Some("hola".to_string()));
}

#[tokio::test]
async fn test_jsonFileStore_load_withMissingFile_shouldLeaveCacheEmpty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("nope.json"));

    let cache = TranslationCache::new();
    store.load(&cache).await.unwrap();

    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_jsonFileStore_load_withCorruptFile_shouldError() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("translations.json");
    tokio::fs::write(&path, "not json at all").await.unwrap();

    let store = JsonFileStore::new(&path);
    let cache = TranslationCache::new();

    assert!(store.load(&cache).await.is_err());
}

#[tokio::test]
async fn test_jsonFileStore_save_shouldWriteNestedLayout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("translations.json");
    let store = JsonFileStore::new(&path);

    let cache = TranslationCache::new();
    cache.set("hello", "fr", "bonjour");
    store.save(&cache).await.unwrap();

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["entries"]["hello"]["fr"], "bonjour");
    assert!(value["saved_at"].is_string());
}

#[tokio::test]
async fn test_jsonFileStore_save_shouldCreateMissingParentDirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deep").join("nested").join("cache.json");
    let store = JsonFileStore::new(&path);

    let cache = TranslationCache::new();
    cache.set("a", "fr", "b");
    store.save(&cache).await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn test_noopStore_shouldDoNothing() {
    let store = NoopStore;
    let cache = TranslationCache::new();
    cache.set("hello", "fr", "bonjour");

    store.save(&cache).await.unwrap();
    store.load(&cache).await.unwrap();

    // Still exactly what we put in.
    assert_eq!(cache.get("hello", "fr"), Some("bonjour".to_string()));
}
