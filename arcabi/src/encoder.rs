//! ABI encoder.

use tracing::trace;

use crate::{checksum::parse_address, util::pad_usize, Bytes, Error, ParamType, Value, Word};

/// Placeholder written into the head slot of an empty dynamic value until the
/// shared zero word is known. It must never look like part of a zero run.
const GUARD: Word = [0xfe; 32];

fn pad_bytes(bytes: &[u8]) -> Vec<Word> {
	let mut result = vec![pad_usize(bytes.len())];
	result.extend(pad_fixed_bytes(bytes));
	result
}

fn pad_fixed_bytes(bytes: &[u8]) -> Vec<Word> {
	let len = (bytes.len() + 31) / 32;
	let mut result = Vec::with_capacity(len);
	for i in 0..len {
		let mut padded = [0u8; 32];

		let to_copy = match i == len - 1 {
			false => 32,
			true => match bytes.len() % 32 {
				0 => 32,
				x => x,
			},
		};

		let offset = 32 * i;
		padded[..to_copy].copy_from_slice(&bytes[offset..offset + to_copy]);
		result.push(padded);
	}

	result
}

#[derive(Debug)]
enum Mediate {
	/// Words stored inline in the head.
	Raw(Vec<Word>),
	/// Pointer to length-prefixed content.
	Prefixed(Vec<Word>),
	/// Pointer to the body of a fixed-size array of dynamic elements.
	PrefixedArray(Vec<Mediate>),
	/// Pointer to a length word followed by the array body.
	PrefixedArrayWithLength(Vec<Mediate>),
	/// Pointer to the zero word shared by every empty dynamic value.
	Empty,
}

impl Mediate {
	fn head_len(&self) -> usize {
		match *self {
			Mediate::Raw(ref raw) => 32 * raw.len(),
			Mediate::Prefixed(_)
			| Mediate::PrefixedArray(_)
			| Mediate::PrefixedArrayWithLength(_)
			| Mediate::Empty => 32,
		}
	}

	fn tail_len(&self) -> usize {
		match *self {
			Mediate::Raw(_) | Mediate::Empty => 0,
			Mediate::Prefixed(ref pre) => pre.len() * 32,
			Mediate::PrefixedArray(ref mediates) => mediates.iter().fold(0, |acc, m| acc + m.head_len() + m.tail_len()),
			Mediate::PrefixedArrayWithLength(ref mediates) => {
				mediates.iter().fold(32, |acc, m| acc + m.head_len() + m.tail_len())
			}
		}
	}
}

/// Head slot of an empty dynamic value and the start of its head block.
#[derive(Debug)]
struct EmptySlot {
	slot: usize,
	base: usize,
}

#[derive(Debug, Default)]
struct Layout {
	buf: Bytes,
	empties: Vec<EmptySlot>,
}

impl Layout {
	fn push(&mut self, word: &Word) {
		self.buf.extend_from_slice(word);
	}

	fn write_head_tail(&mut self, mediates: &[Mediate]) {
		let base = self.buf.len();
		let heads_len = mediates.iter().map(Mediate::head_len).sum::<usize>();

		let mut offset = heads_len;
		for m in mediates {
			match *m {
				Mediate::Raw(ref raw) => raw.iter().for_each(|word| self.push(word)),
				Mediate::Empty => {
					self.empties.push(EmptySlot { slot: self.buf.len(), base });
					self.push(&GUARD);
				}
				_ => self.push(&pad_usize(offset)),
			}
			offset += m.tail_len();
		}

		for m in mediates {
			self.write_tail(m);
		}
	}

	fn write_tail(&mut self, mediate: &Mediate) {
		match *mediate {
			Mediate::Raw(_) | Mediate::Empty => {}
			Mediate::Prefixed(ref words) => words.iter().for_each(|word| self.push(word)),
			Mediate::PrefixedArray(ref mediates) => self.write_head_tail(mediates),
			Mediate::PrefixedArrayWithLength(ref mediates) => {
				self.push(&pad_usize(mediates.len()));
				self.write_head_tail(mediates);
			}
		}
	}

	/// Points every empty dynamic value at one zero word.
	///
	/// The target is the first run of 32 zero bytes at or after the largest
	/// head-block base among the empty values, so every relative pointer is
	/// non negative. Without such a run one zero word is appended.
	fn finish(mut self) -> Bytes {
		let from = match self.empties.iter().map(|e| e.base).max() {
			Some(from) => from,
			None => return self.buf,
		};

		let target = match find_zero_word(&self.buf, from) {
			Some(target) => target,
			None => {
				let target = self.buf.len();
				self.push(&[0u8; 32]);
				target
			}
		};
		trace!(empties = self.empties.len(), target, len = self.buf.len(), "shared empty value target");

		for empty in &self.empties {
			let pointer = pad_usize(target - empty.base);
			self.buf[empty.slot..empty.slot + 32].copy_from_slice(&pointer);
		}
		self.buf
	}
}

/// Start of the first run of 32 zero bytes beginning at or after `from`.
fn find_zero_word(buf: &[u8], from: usize) -> Option<usize> {
	let mut run = 0;
	for (i, byte) in buf.iter().enumerate().skip(from) {
		match *byte {
			0 => {
				run += 1;
				if run == 32 {
					return Some(i + 1 - 32);
				}
			}
			_ => run = 0,
		}
	}
	None
}

/// Encodes values of the given types into ABI compliant vector of bytes.
///
/// Empty dynamic values (`""`, `0x`, `[]`) share a single zero word instead
/// of each getting a length word of their own.
pub fn encode(values: &[Value], types: &[ParamType]) -> Result<Bytes, Error> {
	if values.len() != types.len() {
		return Err(Error::invalid_argument(
			format!("{} values", types.len()),
			format!("{} values", values.len()),
		));
	}

	let mediates = values.iter().zip(types).map(|(v, t)| encode_value(v, t)).collect::<Result<Vec<_>, _>>()?;

	let mut layout = Layout::default();
	layout.write_head_tail(&mediates);
	let encoded = layout.finish();
	trace!(values = values.len(), len = encoded.len(), "encoded values");
	Ok(encoded)
}

fn encode_value(value: &Value, param_type: &ParamType) -> Result<Mediate, Error> {
	let mediate = match (value, param_type) {
		(Value::Bool(b), ParamType::Bool) => {
			let mut word = [0u8; 32];
			if *b {
				word[31] = 1;
			}
			Mediate::Raw(vec![word])
		}
		(Value::Int(int), ParamType::Int(_) | ParamType::Uint(_)) => Mediate::Raw(vec![int.to_word()?]),
		(Value::Address(address), ParamType::Address) => Mediate::Raw(vec![encode_address(address.as_bytes())]),
		(Value::String(s), ParamType::Address) => {
			let address = parse_address(s)?;
			Mediate::Raw(vec![encode_address(address.as_bytes())])
		}
		(Value::FixedBytes(bytes) | Value::Bytes(bytes), ParamType::FixedBytes(len)) => {
			if bytes.len() != *len {
				return Err(Error::FixedBytesLength { expected: *len, found: bytes.len() });
			}
			Mediate::Raw(pad_fixed_bytes(bytes))
		}
		(Value::Bytes(bytes) | Value::FixedBytes(bytes), ParamType::Bytes) => encode_dynamic_bytes(bytes),
		(Value::String(s), ParamType::String) => encode_dynamic_bytes(s.as_bytes()),
		(Value::Function(func), ParamType::Function) => {
			let mut word = [0u8; 32];
			word[..20].copy_from_slice(func.address.as_bytes());
			word[20..24].copy_from_slice(&func.selector);
			Mediate::Raw(vec![word])
		}
		(Value::Array(values), ParamType::Array(elem_type)) => match values.is_empty() {
			true => Mediate::Empty,
			false => Mediate::PrefixedArrayWithLength(encode_elements(values, elem_type)?),
		},
		(Value::Array(values), ParamType::FixedArray(elem_type, len)) => {
			if values.len() != *len {
				return Err(Error::FixedArrayLength { expected: *len, found: values.len() });
			}
			let mediates = encode_elements(values, elem_type)?;
			match (elem_type.is_dynamic(), mediates.is_empty()) {
				(true, true) => Mediate::Empty,
				(true, false) => Mediate::PrefixedArray(mediates),
				(false, _) => Mediate::Raw(
					mediates
						.into_iter()
						.flat_map(|m| match m {
							Mediate::Raw(words) => words,
							_ => vec![],
						})
						.collect(),
				),
			}
		}
		_ => return Err(Error::invalid_argument(param_type, value.kind_name())),
	};
	Ok(mediate)
}

fn encode_elements(values: &[Value], elem_type: &ParamType) -> Result<Vec<Mediate>, Error> {
	values.iter().map(|v| encode_value(v, elem_type)).collect()
}

fn encode_dynamic_bytes(bytes: &[u8]) -> Mediate {
	match bytes.is_empty() {
		true => Mediate::Empty,
		false => Mediate::Prefixed(pad_bytes(bytes)),
	}
}

fn encode_address(address: &[u8]) -> Word {
	let mut padded = [0u8; 32];
	padded[12..].copy_from_slice(address);
	padded
}
