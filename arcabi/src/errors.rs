// Copyright 2015-2020 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

use crate::Address;

/// Arcabi result type
pub type Result<T> = core::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// A value cannot be represented in its declared type.
	Range,
	/// An unknown type name or a value of the wrong shape.
	Type,
	/// Malformed ABI data, hex or JSON.
	Parse,
	/// No single overload matches the call arguments.
	Overload,
	/// The contract reverted with a reason string.
	Revert,
	/// Failure reported by the transport performing the call.
	Transport,
}

/// Arcabi errors
#[derive(Debug, Error)]
pub enum Error {
	/// Invalid entity such as a bad type or function name.
	#[error("Invalid name: {0}")]
	InvalidName(String),
	/// Value does not fit the declared parameter type.
	#[error("Invalid argument: expected {expected}, got {found}")]
	InvalidArgument {
		/// Declared ABI type.
		expected: String,
		/// Description of the supplied value.
		found: String,
	},
	/// Malformed address string.
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
	/// Integer too large for a 256-bit word.
	#[error("Cannot encode {0}: larger than 2^256 - 1")]
	IntegerOverflow(String),
	/// Negative integer below -2^256.
	#[error("Cannot encode {0}: smaller than -2^256")]
	IntegerUnderflow(String),
	/// Byte value whose length differs from its `bytesN` type.
	#[error("A bytes{expected} was expected but a bytes{found} was given")]
	FixedBytesLength {
		/// Declared length.
		expected: usize,
		/// Supplied length.
		found: usize,
	},
	/// Array value whose length differs from its fixed-size array type.
	#[error("An array of {expected} elements was expected but {found} were given")]
	FixedArrayLength {
		/// Declared length.
		expected: usize,
		/// Supplied length.
		found: usize,
	},
	/// A pointer references bytes outside the buffer.
	#[error("A pointer pointed outside the ABI buffer (pointed to {offset}, buffer length was {len} bytes)")]
	PointerOutOfBounds {
		/// Byte offset the pointer resolved to.
		offset: usize,
		/// Buffer length.
		len: usize,
	},
	/// A read ran past the end of the buffer.
	#[error("Attempted to read outside the ABI buffer (tried to read from {from} to {to}, buffer length was {len} bytes)")]
	ReadOutOfBounds {
		/// First byte of the read.
		from: usize,
		/// End of the read, exclusive.
		to: usize,
		/// Buffer length.
		len: usize,
	},
	/// Empty return data for types that cannot be empty.
	#[error(
		"please ensure the contract and method you're calling exist! \
		 failed to decode empty bytes. \
		 if you're using jsonrpc this is likely due to jsonrpc returning \
		 `0x` in case contract or method don't exist"
	)]
	EmptyData,
	/// Invalid data.
	#[error("Invalid data")]
	InvalidData,
	/// Decoded string is not valid UTF-8.
	#[error("Invalid utf-8 string: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),
	/// Malformed hex input.
	#[error("Invalid hex: {0}")]
	Hex(#[from] hex::FromHexError),
	/// Malformed JSON ABI.
	#[cfg(feature = "full-serde")]
	#[error("Serialization error: {0}")]
	Json(#[from] serde_json::Error),
	/// Overload resolution failed.
	#[error(transparent)]
	Overload(#[from] OverloadError),
	/// The contract reverted with the given reason.
	#[error("Contract reverted: {0}")]
	ContractRevert(String),
	/// Transport failure while performing the call.
	#[error("Transport error: {0}")]
	Transport(String),
}

impl Error {
	/// Classifies the error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::IntegerOverflow(_)
			| Error::IntegerUnderflow(_)
			| Error::FixedBytesLength { .. }
			| Error::FixedArrayLength { .. } => ErrorKind::Range,
			Error::InvalidName(_) | Error::InvalidArgument { .. } | Error::InvalidAddress(_) => ErrorKind::Type,
			Error::PointerOutOfBounds { .. }
			| Error::ReadOutOfBounds { .. }
			| Error::EmptyData
			| Error::InvalidData
			| Error::Utf8(_)
			| Error::Hex(_) => ErrorKind::Parse,
			#[cfg(feature = "full-serde")]
			Error::Json(_) => ErrorKind::Parse,
			Error::Overload(_) => ErrorKind::Overload,
			Error::ContractRevert(_) => ErrorKind::Revert,
			Error::Transport(_) => ErrorKind::Transport,
		}
	}

	pub(crate) fn invalid_argument(expected: impl ToString, found: impl Into<String>) -> Self {
		Error::InvalidArgument { expected: expected.to_string(), found: found.into() }
	}
}

/// Overload resolution failures. Each names the contract and the function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverloadError {
	/// No candidate takes the given number of arguments.
	#[error("{}.{name}: expected amount of arguments to be {min} <= x <= {max}, got {actual}", fmt_address(.address))]
	ArityMismatch {
		/// Contract address.
		address: Address,
		/// Function name.
		name: String,
		/// Smallest candidate arity.
		min: usize,
		/// Largest candidate arity.
		max: usize,
		/// Supplied argument count.
		actual: usize,
	},
	/// A null argument was supplied.
	#[error("{}.{name}: null arguments are not allowed (argument {position})", fmt_address(.address))]
	ArgumentError {
		/// Contract address.
		address: Address,
		/// Function name.
		name: String,
		/// Zero-based position of the null argument.
		position: usize,
	},
	/// No candidate accepts the argument categories.
	#[error("{}.{name}: type mismatch", fmt_address(.address))]
	TypeMismatch {
		/// Contract address.
		address: Address,
		/// Function name.
		name: String,
	},
	/// No candidate accepts the argument lengths.
	#[error("{}.{name}: array length mismatch", fmt_address(.address))]
	LengthMismatch {
		/// Contract address.
		address: Address,
		/// Function name.
		name: String,
	},
	/// Several candidates remain.
	#[error(
		"{}.{name}: there are multiple functions with the same name; unable to determine which function to use with the given arguments",
		fmt_address(.address)
	)]
	AmbiguousOverload {
		/// Contract address.
		address: Address,
		/// Function name.
		name: String,
	},
}

fn fmt_address(address: &Address) -> String {
	crate::checksum::to_checksum(address)
}
