use core::{fmt, str::FromStr};

use ethereum_types::{U256, U512};

use crate::{Error, Word};

/// Widest integer still classified as a plain number by overload resolution.
pub const NUMBER_BITS: usize = 48;

/// Signed integer of arbitrary precision with a declared bit width.
///
/// The magnitude envelope is 512 bits, wider than anything a 256-bit word
/// can hold, so out-of-range values are reported when encoding rather than
/// silently truncated on construction. The declared width only drives
/// overload classification; two integers are equal when their numeric values
/// are.
#[derive(Debug, Clone, Copy)]
pub struct Integer {
	negative: bool,
	magnitude: U512,
	bits: usize,
}

impl Integer {
	/// Creates an integer from a sign and a magnitude. `-0` is normalized to `0`.
	pub fn new(negative: bool, magnitude: U512, bits: usize) -> Self {
		Integer { negative: negative && !magnitude.is_zero(), magnitude, bits }
	}

	/// Returns the same value with another declared width.
	pub fn with_bits(self, bits: usize) -> Self {
		Integer { bits, ..self }
	}

	/// Declared bit width.
	pub fn bits(&self) -> usize {
		self.bits
	}

	/// Whether the value is below zero.
	pub fn is_negative(&self) -> bool {
		self.negative
	}

	/// Absolute value.
	pub fn magnitude(&self) -> U512 {
		self.magnitude
	}

	/// Whether the declared width is at most [`NUMBER_BITS`].
	pub fn is_small(&self) -> bool {
		self.bits <= NUMBER_BITS
	}

	/// Value as an `i64`, if it fits.
	pub fn to_i64(&self) -> Option<i64> {
		if self.magnitude > U512::from(u64::MAX) {
			return None;
		}
		let magnitude = self.magnitude.low_u64();
		match self.negative {
			false => i64::try_from(magnitude).ok(),
			true if magnitude == 1 << 63 => Some(i64::MIN),
			true => i64::try_from(magnitude).ok().map(|m| -m),
		}
	}

	/// Value as a `U256`, if it is non negative and fits.
	pub fn to_u256(&self) -> Option<U256> {
		if self.negative || self.magnitude >= two_pow_256() {
			return None;
		}
		Some(low_u256(self.magnitude))
	}

	/// Reads the low `bits` bits of a word, as two's complement when `signed`.
	///
	/// Widths up to [`NUMBER_BITS`] use native 64-bit arithmetic, wider ones
	/// `U256`; both agree on every input.
	pub fn from_word(word: &Word, bits: usize, signed: bool) -> Self {
		let bits = bits.clamp(1, 256);
		if bits <= NUMBER_BITS {
			let mut low = [0u8; 8];
			low.copy_from_slice(&word[24..]);
			let value = u64::from_be_bytes(low) & ((1u64 << bits) - 1);
			return match signed && value >> (bits - 1) == 1 {
				true => Integer::from(value as i64 - (1i64 << bits)).with_bits(bits),
				false => Integer::from(value).with_bits(bits),
			};
		}

		let mask = match bits {
			256 => U256::MAX,
			_ => (U256::one() << bits) - 1,
		};
		let value = U256::from_big_endian(word) & mask;
		match signed && value.bit(bits - 1) {
			true => Integer::new(true, U512::from(((!value) & mask) + 1), bits),
			false => Integer::new(false, U512::from(value), bits),
		}
	}

	/// Encodes the value as one 256-bit two's complement word.
	pub fn to_word(&self) -> Result<Word, Error> {
		let two_pow_256 = two_pow_256();
		let unsigned = match self.negative {
			true if self.magnitude > two_pow_256 => return Err(Error::IntegerUnderflow(self.to_string())),
			true => two_pow_256 - self.magnitude,
			false if self.magnitude >= two_pow_256 => return Err(Error::IntegerOverflow(self.to_string())),
			false => self.magnitude,
		};

		let mut word = [0u8; 32];
		low_u256(unsigned).to_big_endian(&mut word);
		Ok(word)
	}
}

fn two_pow_256() -> U512 {
	U512::one() << 256
}

fn low_u256(value: U512) -> U256 {
	let mut buf = [0u8; 64];
	value.to_big_endian(&mut buf);
	U256::from_big_endian(&buf[32..])
}

impl PartialEq for Integer {
	fn eq(&self, other: &Self) -> bool {
		self.negative == other.negative && self.magnitude == other.magnitude
	}
}

impl Eq for Integer {}

impl fmt::Display for Integer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.negative {
			write!(f, "-")?;
		}
		write!(f, "{}", self.magnitude)
	}
}

impl FromStr for Integer {
	type Err = Error;

	/// Parses a decimal or `0x` prefixed hexadecimal integer with an optional
	/// leading `-`. The declared width is 256 bits.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || Error::invalid_argument("integer", s);
		let (negative, digits) = match s.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, s),
		};
		let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
			Some(hex) if !hex.is_empty() && hex.len() <= 128 => U512::from_str_radix(hex, 16).map_err(|_| invalid())?,
			Some(_) => return Err(invalid()),
			None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
				U512::from_dec_str(digits).map_err(|_| invalid())?
			}
			None => return Err(invalid()),
		};
		Ok(Integer::new(negative, magnitude, 256))
	}
}

macro_rules! impl_from_unsigned {
	($($t:ty),*) => {
		$(
			impl From<$t> for Integer {
				fn from(value: $t) -> Self {
					Integer::new(false, U512::from(value as u64), <$t>::BITS as usize)
				}
			}
		)*
	};
}

macro_rules! impl_from_signed {
	($($t:ty),*) => {
		$(
			impl From<$t> for Integer {
				fn from(value: $t) -> Self {
					Integer::new(value < 0, U512::from(value.unsigned_abs() as u64), <$t>::BITS as usize)
				}
			}
		)*
	};
}

impl_from_unsigned!(u8, u16, u32, u64);
impl_from_signed!(i8, i16, i32, i64);

impl From<usize> for Integer {
	fn from(value: usize) -> Self {
		Integer::new(false, U512::from(value as u64), 64)
	}
}

impl From<U256> for Integer {
	fn from(value: U256) -> Self {
		Integer::new(false, U512::from(value), 256)
	}
}
