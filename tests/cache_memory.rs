// std
use std::sync::Arc;
// crates.io
use time::{Duration, macros};
// self
use usps_client::{
	auth::AccessToken,
	cache::{CacheKey, CredentialCache, MemoryCache},
};

fn token(value: &str) -> AccessToken {
	AccessToken::new(value, 3_600)
}

#[test]
fn put_replaces_existing_entry() {
	let cache = MemoryCache::default();
	let key = CacheKey::for_client("client-a");

	cache.put(key.clone(), token("first"), Duration::minutes(30));
	cache.put(key.clone(), token("second"), Duration::minutes(30));

	let cached = cache.get(&key).expect("Replaced entry should remain live.");

	assert_eq!(cached.access_token.expose(), "second");
	assert_eq!(cache.len(), 1);
}

#[test]
fn get_at_honors_injected_clock() {
	let cache = MemoryCache::default();
	let key = CacheKey::for_client("client-b");
	let issued = macros::datetime!(2025-11-10 12:00 UTC);

	cache.put_at(key.clone(), token("clocked"), Duration::minutes(30), issued);

	assert!(cache.get_at(&key, issued + Duration::minutes(29)).is_some());
	assert!(cache.get_at(&key, issued + Duration::minutes(30)).is_none());
	// Expired reads evict the entry.
	assert!(cache.get_at(&key, issued).is_none());
}

#[test]
fn remove_and_clear_drop_entries() {
	let cache: Arc<dyn CredentialCache> = Arc::new(MemoryCache::default());
	let a = CacheKey::for_client("a");
	let b = CacheKey::for_client("b");

	cache.put(a.clone(), token("a"), Duration::minutes(5));
	cache.put(b.clone(), token("b"), Duration::minutes(5));

	assert_eq!(cache.remove(&a).map(|t| t.access_token.expose().to_owned()), Some("a".into()));
	assert!(cache.remove(&a).is_none());
	assert!(cache.get(&b).is_some());

	cache.clear();

	assert!(cache.get(&b).is_none());
}

#[test]
fn keys_do_not_collide_across_clients() {
	let cache = MemoryCache::default();

	cache.put(CacheKey::for_client("alpha"), token("alpha"), Duration::minutes(5));

	assert!(cache.get(&CacheKey::for_client("beta")).is_none());
	assert_eq!(CacheKey::for_client("alpha").to_string(), "oauth:alpha");
}
