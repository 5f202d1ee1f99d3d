//! Values passed to and returned from contract functions.

mod integer;

pub use integer::{Integer, NUMBER_BITS};

use core::fmt;

use crate::{checksum::to_checksum, Address, ParamType, Selector};

/// Reference to an external function: contract address and selector.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FunctionRef {
	/// Contract address.
	pub address: Address,
	/// Function selector.
	pub selector: Selector,
}

/// Ethereum ABI value.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Value {
	/// Boolean value.
	///
	/// Encoded as the integer 0 or 1.
	Bool(bool),
	/// Signed or unsigned integer.
	///
	/// Encoded as a 256-bit two's complement word.
	Int(Integer),
	/// Address.
	///
	/// Encoded as a left-padded 20-byte value.
	Address(Address),
	/// Bytes of a length known by the declared `bytesN` type.
	///
	/// Encoded right-padded to 32 bytes.
	FixedBytes(Vec<u8>),
	/// Dynamic bytes.
	Bytes(Vec<u8>),
	/// UTF-8 string. Also accepted for `address` when it holds an address.
	String(String),
	/// Array of values, dynamic or fixed by the declared type.
	Array(Vec<Value>),
	/// External function reference.
	Function(FunctionRef),
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			Value::Bool(b) => write!(f, "{}", b),
			Value::Int(ref i) => write!(f, "{}", i),
			Value::Address(ref a) => write!(f, "{}", to_checksum(a)),
			Value::FixedBytes(ref bytes) | Value::Bytes(ref bytes) => write!(f, "{}", hex::encode(bytes)),
			Value::String(ref s) => write!(f, "{}", s),
			Value::Array(ref arr) => {
				let s = arr.iter().map(|ref t| format!("{}", t)).collect::<Vec<String>>().join(",");
				write!(f, "[{}]", s)
			}
			Value::Function(ref func) => {
				write!(f, "{}{}", to_checksum(&func.address), hex::encode(func.selector))
			}
		}
	}
}

impl Value {
	/// Short name of the variant, used in error messages.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Value::Bool(_) => "bool",
			Value::Int(_) => "integer",
			Value::Address(_) => "address",
			Value::FixedBytes(_) => "fixed bytes",
			Value::Bytes(_) => "bytes",
			Value::String(_) => "string",
			Value::Array(_) => "array",
			Value::Function(_) => "function",
		}
	}

	/// Check whether the value can be encoded as the given parameter type.
	///
	/// Length constraints of `bytesN` and `T[k]` are checked too; string
	/// addresses are accepted when they parse.
	pub fn type_check(&self, param_type: &ParamType) -> bool {
		match (self, param_type) {
			(Value::Bool(_), ParamType::Bool) => true,
			(Value::Int(_), ParamType::Int(_) | ParamType::Uint(_)) => true,
			(Value::Address(_), ParamType::Address) => true,
			(Value::String(s), ParamType::Address) => crate::checksum::parse_address(s).is_ok(),
			(Value::String(_), ParamType::String) => true,
			(Value::Bytes(_), ParamType::Bytes) => true,
			(Value::FixedBytes(bytes) | Value::Bytes(bytes), ParamType::FixedBytes(len)) => bytes.len() == *len,
			(Value::Function(_), ParamType::Function) => true,
			(Value::Array(values), ParamType::Array(elem_type)) => values.iter().all(|v| v.type_check(elem_type)),
			(Value::Array(values), ParamType::FixedArray(elem_type, len)) => {
				values.len() == *len && values.iter().all(|v| v.type_check(elem_type))
			}
			_ => false,
		}
	}

	/// Check if all the values match the given parameter types.
	pub fn types_check(values: &[Value], param_types: &[ParamType]) -> bool {
		param_types.len() == values.len() && param_types.iter().zip(values).all(|(t, v)| v.type_check(t))
	}

	/// Converts value to...
	pub fn into_address(self) -> Option<Address> {
		match self {
			Value::Address(address) => Some(address),
			_ => None,
		}
	}

	/// Converts value to...
	pub fn into_bool(self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(b),
			_ => None,
		}
	}

	/// Converts value to...
	pub fn into_int(self) -> Option<Integer> {
		match self {
			Value::Int(int) => Some(int),
			_ => None,
		}
	}

	/// Converts value to...
	pub fn into_string(self) -> Option<String> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	/// Converts value to...
	pub fn into_bytes(self) -> Option<Vec<u8>> {
		match self {
			Value::Bytes(bytes) | Value::FixedBytes(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Converts value to...
	pub fn into_array(self) -> Option<Vec<Value>> {
		match self {
			Value::Array(arr) => Some(arr),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<Integer> for Value {
	fn from(value: Integer) -> Self {
		Value::Int(value)
	}
}

impl From<Address> for Value {
	fn from(value: Address) -> Self {
		Value::Address(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}
