// self
use crate::{
	_prelude::*,
	cache::CacheKey,
	obs::{CacheLookup, CallKind},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("usps_client.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event describing a cache lookup (when tracing is enabled).
pub fn trace_cache_lookup(key: &CacheKey, lookup: CacheLookup) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(key = key.as_str(), result = lookup.as_str(), "token cache lookup");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (key, lookup);
	}
}

/// Emits a warning event for a failed call (when tracing is enabled).
pub fn trace_call_failure(kind: CallKind, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			call = kind.as_str(),
			error_kind = err.kind().as_str(),
			status = err.status_code(),
			"{err}"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, err);
	}
}
