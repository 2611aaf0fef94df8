//! Access token model returned by the OAuth token endpoint.

// self
use crate::{_prelude::*, auth::Secret};

/// Access token issued by `POST /oauth2/v3/token`.
///
/// Only `expires_in` is interpreted by the client; every other field is carried verbatim so
/// callers observe exactly what the provider returned. Fields beyond the three standard ones
/// (`issued_at`, `scope`, `status`, ...) land in [`extra`](AccessToken::extra).
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Bearer credential; callers must avoid logging it.
	pub access_token: Secret,
	/// Advertised lifetime in seconds.
	#[serde(deserialize_with = "de_expires_in")]
	pub expires_in: u64,
	/// Token type as returned, normally `Bearer`; `None` when the provider omitted it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,
	/// Provider-specific fields not modeled above.
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}
impl AccessToken {
	/// Builds a token from its standard fields.
	pub fn new(access_token: impl Into<String>, expires_in: u64) -> Self {
		Self {
			access_token: Secret::new(access_token),
			expires_in,
			token_type: Some("Bearer".into()),
			extra: Default::default(),
		}
	}

	/// Advertised lifetime as a [`Duration`].
	pub fn lifetime(&self) -> Duration {
		Duration::seconds(i64::try_from(self.expires_in).unwrap_or(i64::MAX))
	}

	/// `Authorization` header value for this token.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.field("token_type", &self.token_type)
			.field("extra", &self.extra)
			.finish()
	}
}

// Some gateways quote numeric fields or send them as floats, so accept `"3599"` and `3599.0`
// as well as `3599`. Fractions are truncated.
fn de_expires_in<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
	D: serde::Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Number(u64),
		Float(f64),
		Text(String),
	}

	fn from_float<E>(value: f64) -> Result<u64, E>
	where
		E: serde::de::Error,
	{
		if value.is_finite() && value >= 0. {
			Ok(value as u64)
		} else {
			Err(E::custom(format!("invalid token lifetime {value}")))
		}
	}

	match Raw::deserialize(deserializer)? {
		Raw::Number(value) => Ok(value),
		Raw::Float(value) => from_float(value),
		Raw::Text(value) => {
			let value = value.trim();

			match value.parse::<u64>() {
				Ok(value) => Ok(value),
				Err(_) => from_float(value.parse::<f64>().map_err(serde::de::Error::custom)?),
			}
		},
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_keeps_extra_fields() {
		let token: AccessToken = serde_json::from_str(
			"{\"access_token\":\"abc\",\"token_type\":\"Bearer\",\"expires_in\":28799,\"scope\":\"tracking\",\"status\":\"approved\"}",
		)
		.expect("Token fixture should deserialize.");

		assert_eq!(token.access_token.expose(), "abc");
		assert_eq!(token.expires_in, 28799);
		assert_eq!(token.extra.get("scope").and_then(|v| v.as_str()), Some("tracking"));
		assert_eq!(token.bearer(), "Bearer abc");
		assert!(!format!("{token:?}").contains("abc"));
	}

	#[test]
	fn token_accepts_quoted_expires_in() {
		let token: AccessToken =
			serde_json::from_str("{\"access_token\":\"abc\",\"expires_in\":\"3600\"}")
				.expect("Quoted expires_in should deserialize.");

		assert_eq!(token.expires_in, 3600);
		assert_eq!(token.lifetime(), Duration::hours(1));
	}

	#[test]
	fn token_accepts_fractional_expires_in() {
		let token: AccessToken =
			serde_json::from_str("{\"access_token\":\"abc\",\"expires_in\":3599.0}")
				.expect("Float expires_in should deserialize.");

		assert_eq!(token.expires_in, 3599);

		let token: AccessToken =
			serde_json::from_str("{\"access_token\":\"abc\",\"expires_in\":\"1800.9\"}")
				.expect("Quoted float expires_in should deserialize.");

		assert_eq!(token.expires_in, 1800);
	}

	#[test]
	fn token_rejects_negative_expires_in() {
		let result =
			serde_json::from_str::<AccessToken>("{\"access_token\":\"abc\",\"expires_in\":-5}");

		assert!(result.is_err());
	}

	#[test]
	fn token_type_is_kept_as_returned() {
		let token: AccessToken =
			serde_json::from_str("{\"access_token\":\"abc\",\"expires_in\":3600}")
				.expect("Token without token_type should deserialize.");

		assert_eq!(token.token_type, None);
		assert_eq!(
			serde_json::to_value(&token).expect("Token should serialize."),
			serde_json::json!({ "access_token": "abc", "expires_in": 3600 })
		);

		let token: AccessToken = serde_json::from_str(
			"{\"access_token\":\"abc\",\"token_type\":\"bearer\",\"expires_in\":3600}",
		)
		.expect("Token with token_type should deserialize.");

		assert_eq!(token.token_type.as_deref(), Some("bearer"));
	}

	#[test]
	fn token_rejects_missing_expires_in() {
		let result = serde_json::from_str::<AccessToken>("{\"access_token\":\"abc\"}");

		assert!(result.is_err());
	}
}
