//! Package tracking queries.

// crates.io
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use time::Date;
// self
use crate::{
	_prelude::*,
	client::{RequestOptions, TRACKING_PATH, UspsClient, common},
	http,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const ENDPOINT: &str = "tracking";

time::serde::format_description!(mailing_date_format, Date, "[year]-[month]-[day]");

/// Optional inputs for [`UspsClient::tracking`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackingOptions {
	/// Date the package was mailed; narrows results for recycled tracking numbers.
	pub mailing_date: Option<Date>,
	/// Destination ZIP Code; unlocks detailed results for the recipient.
	pub destination_zip_code: Option<String>,
	/// Detail level requested from the API (for example `SUMMARY` or `DETAIL`).
	pub expand: Option<String>,
	/// Request overrides applied to both the token exchange and the tracking request.
	pub request: RequestOptions,
}
impl TrackingOptions {
	/// Sets the mailing date.
	pub fn with_mailing_date(mut self, date: Date) -> Self {
		self.mailing_date = Some(date);

		self
	}

	/// Sets the destination ZIP Code.
	pub fn with_destination_zip_code(mut self, zip: impl Into<String>) -> Self {
		self.destination_zip_code = Some(zip.into());

		self
	}

	/// Sets the `expand` query parameter.
	pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
		self.expand = Some(expand.into());

		self
	}

	/// Overrides the request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.request = self.request.with_timeout(timeout);

		self
	}
}

/// One element of the tracking request body.
///
/// Optional fields are omitted from the JSON entirely when absent or blank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingQuery {
	/// Tracking number, sent as a string.
	pub tracking_number: String,
	/// Date the package was mailed, serialized as `YYYY-MM-DD`.
	#[serde(with = "mailing_date_format::option", skip_serializing_if = "Option::is_none")]
	pub mailing_date: Option<Date>,
	/// Destination ZIP Code.
	#[serde(rename = "destinationZIPCode", skip_serializing_if = "Option::is_none")]
	pub destination_zip_code: Option<String>,
	/// Detail level; travels in the query string, never in the body.
	#[serde(skip)]
	pub expand: Option<String>,
}
impl TrackingQuery {
	/// Builds the query for `tracking_number`, dropping blank optional values.
	pub fn new(tracking_number: impl Display, options: &TrackingOptions) -> Self {
		Self {
			tracking_number: tracking_number.to_string(),
			mailing_date: options.mailing_date,
			destination_zip_code: non_blank(options.destination_zip_code.as_deref()),
			expand: non_blank(options.expand.as_deref()),
		}
	}

	/// Resolves the request URL, attaching `expand` when present.
	pub fn url(&self, base: &Url) -> Url {
		let mut url = base.clone();

		if let Some(expand) = &self.expand {
			url.query_pairs_mut().append_pair("expand", expand);
		}

		url
	}

	/// Serializes the single-element request body.
	pub fn to_body(&self) -> Result<Vec<u8>, serde_json::Error> {
		serde_json::to_vec(&[self])
	}
}

fn non_blank(value: Option<&str>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty()).map(ToOwned::to_owned)
}

impl UspsClient {
	/// Queries tracking status for `tracking_number`.
	///
	/// A live access token is resolved first (possibly triggering an exchange). The upstream
	/// JSON body is returned verbatim; it may be an array or a single object. Blank tracking
	/// numbers are still sent and surface as the upstream's HTTP error.
	pub async fn tracking(
		&self,
		tracking_number: impl Display,
		options: TrackingOptions,
	) -> Result<serde_json::Value> {
		const KIND: CallKind = CallKind::Tracking;

		let query = TrackingQuery::new(tracking_number, &options);
		let span = CallSpan::new(KIND, "tracking");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.send_tracking(query, options.request)).await;

		common::record_result(KIND, &result);

		result
	}

	async fn send_tracking(
		&self,
		query: TrackingQuery,
		options: RequestOptions,
	) -> Result<serde_json::Value> {
		let token = self.access_token(options).await?;
		let base = self.credentials().endpoint(TRACKING_PATH)?;
		let timeout = self.timeout(options);
		let body = query.to_body().map_err(|e| Error::transport(ENDPOINT, e))?;
		let request = self
			.http_client
			.post(query.url(&base))
			.header(AUTHORIZATION, token.bearer())
			.header(CONTENT_TYPE, "application/json")
			.body(body);
		let response = http::dispatch(ENDPOINT, request, timeout).await?;

		http::read_json(ENDPOINT, response, timeout).await
	}
}
