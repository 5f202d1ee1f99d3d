//! EIP-55 mixed-case address checksums.

use crate::{signature::keccak256, Address, Error};

/// Formats an address as `0x` followed by its EIP-55 checksummed hex digits.
pub fn to_checksum(address: &Address) -> String {
	let lower = hex::encode(address.as_bytes());
	let hash = keccak256(lower.as_bytes());

	let mut out = String::with_capacity(42);
	out.push_str("0x");
	for (i, c) in lower.chars().enumerate() {
		let nibble = (hash[i / 2] >> if i % 2 == 0 { 4 } else { 0 }) & 0x0f;
		if nibble >= 8 {
			out.push(c.to_ascii_uppercase());
		} else {
			out.push(c);
		}
	}
	out
}

/// Parses a `0x` prefixed address.
///
/// All-lowercase and all-uppercase digits are accepted as is; mixed case must
/// be a valid checksum.
pub fn parse_address(value: &str) -> Result<Address, Error> {
	let invalid = || Error::InvalidAddress(value.to_owned());
	let digits = value.strip_prefix("0x").ok_or_else(invalid)?;
	if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(invalid());
	}

	let mut bytes = [0u8; 20];
	hex::decode_to_slice(digits, &mut bytes).map_err(|_| invalid())?;
	let address = Address::from(bytes);

	let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
	let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
	if has_lower && has_upper && &to_checksum(&address)[2..] != digits {
		return Err(invalid());
	}

	Ok(address)
}

/// Returns whether the string is an acceptable address for [`parse_address`].
pub fn is_valid_address(value: &str) -> bool {
	parse_address(value).is_ok()
}
