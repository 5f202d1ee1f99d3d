//! Utils used by different modules.

use crate::{Bytes, Error, Word};

/// Converts a usize to a right aligned array of 32 bytes.
pub fn pad_usize(value: usize) -> Word {
	let mut padded = [0u8; 32];
	padded[24..].copy_from_slice(&(value as u64).to_be_bytes());
	padded
}

/// Strips an optional `0x`/`0X` prefix.
pub fn strip_hex_prefix(value: &str) -> &str {
	value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value)
}

/// Decodes a hex string with an optional `0x` prefix.
pub fn hex_to_bytes(value: &str) -> Result<Bytes, Error> {
	hex::decode(strip_hex_prefix(value)).map_err(Into::into)
}

/// Encodes bytes as a `0x` prefixed lowercase hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
	format!("0x{}", hex::encode(bytes))
}

#[cfg(feature = "full-serde")]
pub(crate) mod sanitize_name {
	use serde::{Deserialize, Deserializer};

	/// Drops anything from the first `(` on, so `foo()` names the function `foo`.
	pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
	where
		D: Deserializer<'de>,
	{
		let mut name = String::deserialize(deserializer)?;
		if let Some(i) = name.find('(') {
			name.truncate(i);
		}
		Ok(name)
	}
}
