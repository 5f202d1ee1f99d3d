#[cfg(feature = "full-serde")]
use serde::{Deserialize, Serialize};

/// Whether a function modifies or reads blockchain state
#[cfg_attr(feature = "full-serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "full-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StateMutability {
	/// Specified not to read blockchain state
	Pure,
	/// Specified to not modify the blockchain state
	View,
	/// Function does not accept Ether - the default
	#[default]
	NonPayable,
	/// Function accepts Ether
	Payable,
}

impl StateMutability {
	/// Whether calling the function leaves state untouched.
	pub fn is_read_only(&self) -> bool {
		matches!(self, StateMutability::Pure | StateMutability::View)
	}
}
