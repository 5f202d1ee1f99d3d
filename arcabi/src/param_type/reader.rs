use crate::{Error, ParamType};

/// Used to convert param type represented as a string to rust structure.
pub struct Reader;

impl Reader {
	/// Converts string to param type.
	pub fn read(name: &str) -> Result<ParamType, Error> {
		// check if it is a fixed or dynamic array.
		if let Some(stripped) = name.strip_suffix(']') {
			let open = stripped.rfind('[').ok_or_else(|| Error::InvalidName(name.to_owned()))?;
			let (subtype, num) = (&stripped[..open], &stripped[open + 1..]);
			let subtype = Reader::read(subtype)?;

			if num.is_empty() {
				// we already know it's a dynamic array!
				return Ok(ParamType::Array(Box::new(subtype)));
			}

			// it's a fixed array.
			let len = num.parse::<usize>().map_err(|_| Error::InvalidName(name.to_owned()))?;
			return Ok(ParamType::FixedArray(Box::new(subtype), len));
		}

		let result = match name {
			"address" => ParamType::Address,
			"bytes" => ParamType::Bytes,
			"byte" => ParamType::FixedBytes(1),
			"bool" => ParamType::Bool,
			"string" => ParamType::String,
			"function" => ParamType::Function,
			"int" => ParamType::Int(256),
			"uint" => ParamType::Uint(256),
			s if s.starts_with("int") => ParamType::Int(Self::integer_width(name, &s[3..])?),
			s if s.starts_with("uint") => ParamType::Uint(Self::integer_width(name, &s[4..])?),
			s if s.starts_with("bytes") => {
				let len = Self::number(name, &s[5..])?;
				if !(1..=32).contains(&len) {
					return Err(Error::InvalidName(name.to_owned()));
				}
				ParamType::FixedBytes(len)
			}
			_ => {
				return Err(Error::InvalidName(name.to_owned()));
			}
		};

		Ok(result)
	}

	fn integer_width(name: &str, digits: &str) -> Result<usize, Error> {
		let width = Self::number(name, digits)?;
		match width % 8 == 0 && (8..=256).contains(&width) {
			true => Ok(width),
			false => Err(Error::InvalidName(name.to_owned())),
		}
	}

	fn number(name: &str, digits: &str) -> Result<usize, Error> {
		// `usize::from_str` tolerates a leading `+`
		if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
			return Err(Error::InvalidName(name.to_owned()));
		}
		digits.parse().map_err(|_| Error::InvalidName(name.to_owned()))
	}
}
