//! Shared helpers for client operations (single-flight guards, outcome recording).

// self
use crate::{
	_prelude::*,
	cache::CacheKey,
	client::UspsClient,
	obs::{self, CallKind, CallOutcome},
};

/// Returns (and creates on demand) the single-flight guard for a cache key.
pub(crate) fn flow_guard(client: &UspsClient, key: &CacheKey) -> Arc<AsyncMutex<()>> {
	let mut guards = client.flow_guards.lock();

	guards.entry(key.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
}

/// Records the final outcome of a call.
pub(crate) fn record_result<T>(kind: CallKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
		Err(e) => {
			obs::trace_call_failure(kind, e);
			obs::record_call_outcome(kind, CallOutcome::Failure);
		},
	}
}
