//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use usps_client::{
	auth::ClientCredentials,
	cache::{CredentialCache, MemoryCache},
	client::UspsClient,
};

pub const CLIENT_ID: &str = "usps-client-id";
pub const CLIENT_SECRET: &str = "usps-client-secret";

/// Token endpoint body advertising a 30 minute lifetime.
pub fn token_body(access_token: &str) -> String {
	format!(
		"{{\"access_token\":\"{access_token}\",\"token_type\":\"Bearer\",\"expires_in\":1800,\"issued_at\":1731240000000,\"scope\":\"tracking\"}}"
	)
}

/// Credentials pointing at the mock server.
pub fn credentials(server: &MockServer, client_id: &str) -> ClientCredentials {
	ClientCredentials::new(client_id, CLIENT_SECRET).with_environment_url(server.base_url())
}

/// Client with a private cache pointing at the mock server.
pub fn build_client(server: &MockServer) -> UspsClient {
	UspsClient::new(credentials(server, CLIENT_ID))
}

/// Client sharing `cache`, returning the concrete cache handle for inspection.
pub fn build_shared_client(
	server: &MockServer,
	client_id: &str,
	cache: &Arc<MemoryCache>,
) -> UspsClient {
	let cache: Arc<dyn CredentialCache> = cache.clone();

	UspsClient::with_cache(credentials(server, client_id), cache)
}
