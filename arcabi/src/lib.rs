//! Ethereum contract ABI codec with runtime overload dispatch.
//!
//! The crate encodes call arguments and decodes return data following the
//! Solidity contract ABI, picks the right function out of a set of overloads
//! from the shape of the supplied arguments, and extracts revert reasons from
//! failed calls. Network access is left to a [`Caller`] supplied by the user.

#![warn(missing_docs)]

pub mod checksum;
pub mod overload;
pub mod param_type;
pub mod revert;
#[cfg(feature = "full-serde")]
pub mod token;
pub mod value;

#[cfg(feature = "full-serde")]
mod contract;
mod decoder;
mod encoder;
mod errors;
mod event;
mod event_param;
mod function;
#[cfg(feature = "full-serde")]
mod instance;
mod log;
#[cfg(feature = "full-serde")]
mod operation;
mod param;
mod signature;
mod state_mutability;
pub mod util;

#[cfg(feature = "full-serde")]
pub use crate::contract::{Contract, Events, Functions};
#[cfg(feature = "full-serde")]
pub use crate::instance::{CallOptions, CallResult, Caller, Instance, Method};
#[cfg(feature = "full-serde")]
pub use crate::operation::Operation;
pub use crate::{
	decoder::{decode, decode_string, decode_string_hex},
	encoder::encode,
	errors::{Error, ErrorKind, OverloadError, Result},
	event::Event,
	event_param::EventParam,
	function::Function,
	log::{Log, LogParam, RawLog},
	param::Param,
	param_type::ParamType,
	signature::{long_signature, selector_hex, short_signature},
	state_mutability::StateMutability,
	value::{FunctionRef, Integer, Value},
};

/// ABI word.
pub type Word = [u8; 32];

/// ABI address.
pub type Address = ethereum_types::Address;

/// ABI bytes.
pub type Bytes = Vec<u8>;

/// ABI unsigned integer.
pub type Uint = ethereum_types::U256;

/// Commonly used FixedBytes of size 32
pub type Hash = ethereum_types::H256;

/// 4-byte function selector.
pub type Selector = [u8; 4];
