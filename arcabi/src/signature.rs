use sha3::{Digest, Keccak256};

use crate::{param_type::Writer, Hash, ParamType, Selector};

/// Returns the first four bytes of the Keccak-256 hash of the signature of the given params
pub fn short_signature(name: &str, params: &[ParamType]) -> Selector {
	let mut result = [0u8; 4];
	fill_signature(name, params, &mut result);
	result
}

/// Returns the full Keccak-256 hash of the signature of the given params
pub fn long_signature(name: &str, params: &[ParamType]) -> Hash {
	let mut result = [0u8; 32];
	fill_signature(name, params, &mut result);
	result.into()
}

/// Renders a selector as `0x` followed by eight hex digits.
pub fn selector_hex(selector: &Selector) -> String {
	format!("0x{}", hex::encode(selector))
}

/// Canonical signature: the name followed by the canonical type names.
pub(crate) fn canonical_signature(name: &str, params: &[ParamType]) -> String {
	let types = params.iter().map(Writer::write).collect::<Vec<String>>().join(",");
	format!("{}({})", name, types)
}

pub(crate) fn keccak256(data: &[u8]) -> [u8; 32] {
	let mut result = [0u8; 32];
	result.copy_from_slice(&Keccak256::digest(data));
	result
}

fn fill_signature(name: &str, params: &[ParamType], result: &mut [u8]) {
	let signature = canonical_signature(name, params);
	let hash = keccak256(signature.as_bytes());
	result.copy_from_slice(&hash[..result.len()]);
	tracing::trace!(%signature, hash = %hex::encode(&*result), "computed signature hash");
}
