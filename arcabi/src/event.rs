//! Contract event.

#[cfg(feature = "full-serde")]
use serde::{Deserialize, Serialize};

use crate::{
	decode, signature::long_signature, Error, EventParam, Hash, Log, LogParam, ParamType, RawLog, Result,
};

/// Contract event.
#[cfg_attr(feature = "full-serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
	/// Event name.
	#[cfg_attr(feature = "full-serde", serde(deserialize_with = "crate::util::sanitize_name::deserialize"))]
	pub name: String,
	/// Event input.
	pub inputs: Vec<EventParam>,
	/// If anonymous, event cannot be found using `from` filter.
	#[cfg_attr(feature = "full-serde", serde(default))]
	pub anonymous: bool,
}

impl Event {
	/// Returns names of all params.
	fn params_names(&self) -> Vec<String> {
		self.inputs.iter().map(|p| p.name.clone()).collect()
	}

	/// Returns types of all params.
	fn param_types(&self) -> Vec<ParamType> {
		self.inputs.iter().map(|p| p.kind.clone()).collect()
	}

	/// Event signature
	pub fn signature(&self) -> Hash {
		long_signature(&self.name, &self.param_types())
	}

	/// Decodes event indexed params and data.
	pub fn parse_log(&self, log: RawLog) -> Result<Log> {
		let topics = log.topics;
		let data = log.data;

		// then take first topic if event is not anonymous
		let to_skip = if self.anonymous {
			0
		} else {
			// verify
			let event_signature = topics.first().ok_or(Error::InvalidData)?;
			if event_signature != &self.signature() {
				return Err(Error::InvalidData);
			}
			1
		};

		let topic_types =
			self.inputs.iter().filter(|p| p.indexed).map(EventParam::topic_kind).collect::<Vec<ParamType>>();

		// topic may be only a 32 bytes encoded value
		if topic_types.len() != topics.len() - to_skip {
			return Err(Error::InvalidData);
		}

		let flat_topics = topics.into_iter().skip(to_skip).flat_map(|t| t.as_bytes().to_vec()).collect::<Vec<u8>>();
		let mut topic_values = decode(&topic_types, &flat_topics)?.into_iter();

		let data_types = self.inputs.iter().filter(|p| !p.indexed).map(|p| p.kind.clone()).collect::<Vec<ParamType>>();
		let mut data_values = decode(&data_types, &data)?.into_iter();

		let params = self
			.inputs
			.iter()
			.zip(self.params_names())
			.map(|(param, name)| {
				let value = match param.indexed {
					true => topic_values.next(),
					false => data_values.next(),
				};
				value.map(|value| LogParam { name, value }).ok_or(Error::InvalidData)
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(Log { params })
	}
}
