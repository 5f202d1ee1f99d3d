//! Coarse categories of call arguments and declared parameter shapes.

use crate::{value::NUMBER_BITS, ParamType, Value};

/// Base kind shared by call arguments and declared parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
	/// Integer of at most 48 bits.
	Number,
	/// Boolean.
	Boolean,
	/// Text that does not look like an address.
	String,
	/// Address, or text shaped like `0x` followed by 40 hex digits.
	Address,
	/// Integer wider than 48 bits.
	BigInteger,
	/// Fixed or dynamic bytes.
	ByteSequence,
	/// Array.
	Sequence,
	/// External function reference.
	FunctionReference,
}

/// Category of one call argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
	/// Missing argument. Never accepted.
	Null,
	/// Any value but an array.
	Scalar(Base),
	/// Array tagged with the base of its first element, `None` when empty.
	Sequence(Option<Base>),
}

/// Length constraint of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
	/// Not length tagged.
	Scalar,
	/// `T[n]` or `bytesN`.
	Fixed(usize),
	/// `T[]` or `bytes`.
	Dynamic,
}

/// Declared shape of a parameter, as seen by overload resolution.
///
/// Only one level of array nesting is inspected: the element of `T[][]` is
/// just [`Base::Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
	/// Base kind; [`Base::Sequence`] for arrays.
	pub base: Base,
	/// Length constraint.
	pub arity: Arity,
	/// Element base for arrays.
	pub element: Option<Base>,
}

impl Shape {
	/// Whether an argument of the given category may be passed here.
	///
	/// Lengths are not checked; an empty array fits every array parameter.
	pub fn accepts(&self, category: &Category) -> bool {
		match *category {
			Category::Null => false,
			Category::Scalar(base) => self.base == base,
			Category::Sequence(None) => self.base == Base::Sequence,
			Category::Sequence(element) => self.base == Base::Sequence && self.element == element,
		}
	}
}

impl From<&ParamType> for Shape {
	fn from(param: &ParamType) -> Self {
		let scalar = |base| Shape { base, arity: Arity::Scalar, element: None };
		match *param {
			ParamType::Address => scalar(Base::Address),
			ParamType::Bool => scalar(Base::Boolean),
			ParamType::String => scalar(Base::String),
			ParamType::Function => scalar(Base::FunctionReference),
			ParamType::Int(bits) | ParamType::Uint(bits) if bits <= NUMBER_BITS => scalar(Base::Number),
			ParamType::Int(_) | ParamType::Uint(_) => scalar(Base::BigInteger),
			ParamType::Bytes => Shape { base: Base::ByteSequence, arity: Arity::Dynamic, element: None },
			ParamType::FixedBytes(len) => Shape { base: Base::ByteSequence, arity: Arity::Fixed(len), element: None },
			ParamType::Array(ref elem) => {
				Shape { base: Base::Sequence, arity: Arity::Dynamic, element: Some(Shape::from(&**elem).base) }
			}
			ParamType::FixedArray(ref elem, len) => {
				Shape { base: Base::Sequence, arity: Arity::Fixed(len), element: Some(Shape::from(&**elem).base) }
			}
		}
	}
}

/// Whether the text is `0x` followed by exactly 40 hex digits, in any case.
pub fn looks_like_address(s: &str) -> bool {
	match s.strip_prefix("0x") {
		Some(digits) => digits.len() == 40 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
		None => false,
	}
}

fn base_of(value: &Value) -> Base {
	match value {
		Value::Bool(_) => Base::Boolean,
		Value::Int(int) if int.is_small() => Base::Number,
		Value::Int(_) => Base::BigInteger,
		Value::Address(_) => Base::Address,
		Value::String(s) if looks_like_address(s) => Base::Address,
		Value::String(_) => Base::String,
		Value::FixedBytes(_) | Value::Bytes(_) => Base::ByteSequence,
		Value::Array(_) => Base::Sequence,
		Value::Function(_) => Base::FunctionReference,
	}
}

/// Classifies a call argument.
pub fn classify(arg: Option<&Value>) -> Category {
	match arg {
		None => Category::Null,
		Some(Value::Array(values)) => Category::Sequence(values.first().map(base_of)),
		Some(value) => Category::Scalar(base_of(value)),
	}
}

/// Length an argument is checked against for fixed-length parameters.
pub fn length_of(value: &Value) -> Option<usize> {
	match value {
		Value::Array(values) => Some(values.len()),
		Value::FixedBytes(bytes) | Value::Bytes(bytes) => Some(bytes.len()),
		_ => None,
	}
}
