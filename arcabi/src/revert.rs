//! Standard `Error(string)` revert payloads.

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::{decode_string, signature::short_signature, Error, ParamType, Result, Selector};

/// Selector of `Error(string)`, `0x08c379a0`.
pub static ERROR_SELECTOR: Lazy<Selector> = Lazy::new(|| short_signature("Error", &[ParamType::String]));

/// Extracts the reason of a standard revert payload.
///
/// Returns `None` for anything else, including payloads that carry the
/// selector but do not hold a well formed string.
pub fn decode_revert_reason(payload: &[u8]) -> Option<String> {
	let body = payload.strip_prefix(&ERROR_SELECTOR[..])?;
	if body.len() % 32 != 0 {
		return None;
	}

	match decode_string(body, 0) {
		Ok(reason) => Some(reason),
		Err(err) => {
			trace!(%err, "payload carries the revert selector but no reason");
			None
		}
	}
}

/// Fails with [`Error::ContractRevert`] if the payload is a standard revert.
pub fn check_revert(payload: &[u8]) -> Result<()> {
	match decode_revert_reason(payload) {
		Some(reason) => {
			debug!(%reason, "contract reverted");
			Err(Error::ContractRevert(reason))
		}
		None => Ok(()),
	}
}
