//! Demonstrates resolving a cached access token and querying tracking status against a local
//! mock of the USPS API.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use usps_client::{
	auth::ClientCredentials,
	cache::{CredentialCache, MemoryCache},
	client::{TrackingOptions, UspsClient},
	config::ClientConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/v3/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":28799}",
			);
		})
		.await;
	let tracking_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/tracking/v3r2/tracking")
				.header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				"[{\"trackingNumber\":\"9434650899562092878282\",\"statusCategory\":\"In Transit\"}]",
			);
		})
		.await;
	let cache: Arc<dyn CredentialCache> = Arc::new(MemoryCache::default());
	let config = ClientConfig::builder()
		.client_id("demo-client")
		.client_secret("super-secret")
		.environment_url(server.base_url())
		.build()?;
	let client = UspsClient::with_cache(config, cache.clone());
	// A second client over the same credentials reuses the cached token.
	let sibling = UspsClient::with_cache(
		ClientCredentials::new("demo-client", "super-secret")
			.with_environment_url(server.base_url()),
		cache,
	);

	for client in [&client, &sibling] {
		let tracking = client
			.tracking("9434650899562092878282", TrackingOptions::default().with_expand("SUMMARY"))
			.await?;

		println!("Tracking status: {tracking}.");
	}

	token_mock.assert_async().await;
	tracking_mock.assert_calls_async(2).await;

	Ok(())
}
