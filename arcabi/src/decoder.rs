//! ABI decoder.

use crate::{util::hex_to_bytes, value::FunctionRef, Address, Error, Integer, ParamType, Value, Word};

#[derive(Debug)]
struct DecodeResult {
	value: Value,
	new_offset: usize,
}

/// Reads a pointer or length word, saturating at `usize::MAX`.
fn as_usize(slice: &Word) -> usize {
	if !slice[..24].iter().all(|x| *x == 0) {
		return usize::MAX;
	}

	let mut low = [0u8; 8];
	low.copy_from_slice(&slice[24..]);
	usize::try_from(u64::from_be_bytes(low)).unwrap_or(usize::MAX)
}

/// Decodes ABI compliant vector of bytes into vector of values described by types param.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Value>, Error> {
	let is_empty_bytes_valid_encoding = types.iter().all(|t| t.is_empty_bytes_valid_encoding());
	if !is_empty_bytes_valid_encoding && data.is_empty() {
		return Err(Error::EmptyData);
	}

	let mut values = vec![];
	let mut offset = 0;

	for param in types {
		let res = decode_param(param, data, 0, offset)?;
		offset = res.new_offset;
		values.push(res.value);
	}

	Ok(values)
}

/// Decodes the string whose pointer slot starts at `offset`.
pub fn decode_string(data: &[u8], offset: usize) -> Result<String, Error> {
	match decode_param(&ParamType::String, data, 0, offset)?.value {
		Value::String(s) => Ok(s),
		_ => Err(Error::InvalidData),
	}
}

/// Same as [`decode_string`] for hex input with an optional `0x` prefix.
pub fn decode_string_hex(data: &str, offset: usize) -> Result<String, Error> {
	decode_string(&hex_to_bytes(data)?, offset)
}

fn peek(data: &[u8], offset: usize, len: usize) -> Result<&[u8], Error> {
	match offset.checked_add(len) {
		Some(end) if end <= data.len() => Ok(&data[offset..end]),
		_ => Err(Error::ReadOutOfBounds { from: offset, to: offset.saturating_add(len), len: data.len() }),
	}
}

fn peek_32_bytes(data: &[u8], offset: usize) -> Result<Word, Error> {
	peek(data, offset, 32).map(|x| {
		let mut out: Word = [0u8; 32];
		out.copy_from_slice(&x[0..32]);
		out
	})
}

/// Resolves the pointer stored at `offset` against the head block starting at
/// `base`, requiring `need` readable bytes at the target.
fn follow_pointer(data: &[u8], base: usize, offset: usize, need: usize) -> Result<usize, Error> {
	let pointer = as_usize(&peek_32_bytes(data, offset)?);
	let target = base.saturating_add(pointer);
	match target.checked_add(need) {
		Some(end) if end <= data.len() => Ok(target),
		_ => Err(Error::PointerOutOfBounds { offset: target, len: data.len() }),
	}
}

/// Reads a length word at `target` and the bytes that follow it.
fn take_length_prefixed(data: &[u8], target: usize) -> Result<Vec<u8>, Error> {
	let len = as_usize(&peek_32_bytes(data, target)?);
	peek(data, target + 32, len).map(<[u8]>::to_vec)
}

fn decode_param(param: &ParamType, data: &[u8], base: usize, offset: usize) -> Result<DecodeResult, Error> {
	match *param {
		ParamType::Address => {
			let slice = peek_32_bytes(data, offset)?;
			let mut address = [0u8; 20];
			address.copy_from_slice(&slice[12..]);
			let result = DecodeResult { value: Value::Address(address.into()), new_offset: offset + 32 };
			Ok(result)
		}
		ParamType::Int(bits) | ParamType::Uint(bits) => {
			let slice = peek_32_bytes(data, offset)?;
			let signed = matches!(param, ParamType::Int(_));
			let result =
				DecodeResult { value: Value::Int(Integer::from_word(&slice, bits, signed)), new_offset: offset + 32 };
			Ok(result)
		}
		ParamType::Bool => {
			let b = peek_32_bytes(data, offset)?.iter().any(|x| *x != 0);
			let result = DecodeResult { value: Value::Bool(b), new_offset: offset + 32 };
			Ok(result)
		}
		ParamType::FixedBytes(len) => {
			// read the full word, padding included
			let bytes = peek_32_bytes(data, offset)?[..len].to_vec();
			let result = DecodeResult { value: Value::FixedBytes(bytes), new_offset: offset + 32 };
			Ok(result)
		}
		ParamType::Function => {
			let slice = peek_32_bytes(data, offset)?;
			let mut selector = [0u8; 4];
			selector.copy_from_slice(&slice[20..24]);
			let func = FunctionRef { address: Address::from_slice(&slice[..20]), selector };
			let result = DecodeResult { value: Value::Function(func), new_offset: offset + 32 };
			Ok(result)
		}
		ParamType::Bytes => {
			let target = follow_pointer(data, base, offset, 32)?;
			let bytes = take_length_prefixed(data, target)?;
			let result = DecodeResult { value: Value::Bytes(bytes), new_offset: offset + 32 };
			Ok(result)
		}
		ParamType::String => {
			let target = follow_pointer(data, base, offset, 32)?;
			let bytes = take_length_prefixed(data, target)?;
			let result = DecodeResult { value: Value::String(String::from_utf8(bytes)?), new_offset: offset + 32 };
			Ok(result)
		}
		ParamType::Array(ref t) => {
			let target = follow_pointer(data, base, offset, 32)?;
			let len = as_usize(&peek_32_bytes(data, target)?);
			let body = target + 32;
			let values = decode_elements(t, len, data, body)?;
			let result = DecodeResult { value: Value::Array(values), new_offset: offset + 32 };
			Ok(result)
		}
		ParamType::FixedArray(ref t, len) if param.is_dynamic() => {
			let body = follow_pointer(data, base, offset, len.saturating_mul(32))?;
			let values = decode_elements(t, len, data, body)?;
			let result = DecodeResult { value: Value::Array(values), new_offset: offset + 32 };
			Ok(result)
		}
		ParamType::FixedArray(ref t, len) => {
			let values = decode_elements(t, len, data, offset)?;
			let result = DecodeResult { value: Value::Array(values), new_offset: offset + 32 * param.head_words() };
			Ok(result)
		}
	}
}

/// Decodes `len` elements laid out as one head block starting at `body`.
fn decode_elements(t: &ParamType, len: usize, data: &[u8], body: usize) -> Result<Vec<Value>, Error> {
	// a forged length must not allocate more than the buffer could describe
	let end = len.checked_mul(t.head_words()).and_then(|n| n.checked_mul(32)).and_then(|n| n.checked_add(body));
	match end {
		Some(end) if end <= data.len() && len <= data.len() => {}
		_ => {
			return Err(Error::ReadOutOfBounds { from: body, to: end.unwrap_or(usize::MAX), len: data.len() });
		}
	}

	let mut values = Vec::with_capacity(len);
	let mut new_offset = body;
	for _ in 0..len {
		let res = decode_param(t, data, body, new_offset)?;
		new_offset = res.new_offset;
		values.push(res.value);
	}
	Ok(values)
}
