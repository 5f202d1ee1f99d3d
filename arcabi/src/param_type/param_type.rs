//! Function and event param types.

use core::fmt;

use super::Writer;

/// Function and event param types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
	/// Address.
	Address,
	/// Bytes.
	Bytes,
	/// Signed integer.
	Int(usize),
	/// Unsigned integer.
	Uint(usize),
	/// Boolean.
	Bool,
	/// String.
	String,
	/// External function reference: address and selector packed in one word.
	Function,
	/// Array of unknown size.
	Array(Box<ParamType>),
	/// Vector of bytes with fixed size.
	FixedBytes(usize),
	/// Array with fixed size.
	FixedArray(Box<ParamType>, usize),
}

impl fmt::Display for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", Writer::write(self))
	}
}

impl ParamType {
	/// returns whether a zero length byte slice (`0x`) is
	/// a valid encoded form of this param type
	pub fn is_empty_bytes_valid_encoding(&self) -> bool {
		!self.is_dynamic() && self.head_words() == 0
	}

	/// Returns whether the values of this type are encoded behind a pointer.
	///
	/// Dynamic types are `bytes`, `string`, any `T[]`, and `T[k]` for dynamic
	/// `T`. Every other type occupies a fixed number of head words.
	pub fn is_dynamic(&self) -> bool {
		match self {
			ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
			ParamType::FixedArray(elem_type, _) => elem_type.is_dynamic(),
			_ => false,
		}
	}

	/// Number of head words occupied by a value of this type, saturating at
	/// `usize::MAX` for fixed arrays too large to address.
	pub fn head_words(&self) -> usize {
		match self {
			ParamType::FixedArray(elem_type, len) if !elem_type.is_dynamic() => len.saturating_mul(elem_type.head_words()),
			_ => 1,
		}
	}
}
