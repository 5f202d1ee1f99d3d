use std::{
	collections::{btree_map::Values, BTreeMap},
	io,
	iter::Flatten,
};

use serde::{Deserialize, Deserializer};

use crate::{Error, Event, Function, Operation, Result};

/// API building calls to contracts ABI.
///
/// Overloads sharing a name are kept in the order the ABI lists them.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Contract {
	/// Contract functions.
	pub functions: BTreeMap<String, Vec<Function>>,
	/// Contract events, by name.
	pub events: BTreeMap<String, Vec<Event>>,
	/// Contract has receive function.
	pub receive: bool,
	/// Contract has fallback function.
	pub fallback: bool,
}

impl<'a> Deserialize<'a> for Contract {
	fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
	where
		D: Deserializer<'a>,
	{
		Vec::<Operation>::deserialize(deserializer).map(Contract::from_operations)
	}
}

impl Contract {
	fn from_operations(operations: Vec<Operation>) -> Self {
		let mut result = Contract::default();
		for operation in operations {
			match operation {
				Operation::Function(func) => {
					result.functions.entry(func.name.clone()).or_default().push(func);
				}
				Operation::Event(event) => {
					result.events.entry(event.name.clone()).or_default().push(event);
				}
				Operation::Fallback => result.fallback = true,
				Operation::Receive => result.receive = true,
				Operation::Constructor | Operation::Error => {}
			}
		}
		result
	}

	/// Loads contract from json.
	pub fn load<T: io::Read>(reader: T) -> Result<Self> {
		serde_json::from_reader(reader).map_err(From::from)
	}

	/// Get the function named `name`, the first if there are overloaded
	/// versions of the same function.
	pub fn function(&self, name: &str) -> Result<&Function> {
		self.functions.get(name).into_iter().flatten().next().ok_or_else(|| Error::InvalidName(name.to_owned()))
	}

	/// Get the contract event named `name`, the first if there are multiple.
	pub fn event(&self, name: &str) -> Result<&Event> {
		self.events.get(name).into_iter().flatten().next().ok_or_else(|| Error::InvalidName(name.to_owned()))
	}

	/// Get all functions named `name`, in ABI order.
	pub fn functions_by_name(&self, name: &str) -> Result<&Vec<Function>> {
		self.functions.get(name).ok_or_else(|| Error::InvalidName(name.to_owned()))
	}

	/// Get all events named `name`.
	pub fn events_by_name(&self, name: &str) -> Result<&Vec<Event>> {
		self.events.get(name).ok_or_else(|| Error::InvalidName(name.to_owned()))
	}

	/// Iterate over all functions of the contract in arbitrary order.
	pub fn functions(&self) -> Functions {
		Functions(self.functions.values().flatten())
	}

	/// Iterate over all events of the contract in arbitrary order.
	pub fn events(&self) -> Events {
		Events(self.events.values().flatten())
	}
}

/// Contract functions iterator.
pub struct Functions<'a>(Flatten<Values<'a, String, Vec<Function>>>);

impl<'a> Iterator for Functions<'a> {
	type Item = &'a Function;

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next()
	}
}

/// Contract events iterator.
pub struct Events<'a>(Flatten<Values<'a, String, Vec<Event>>>);

impl<'a> Iterator for Events<'a> {
	type Item = &'a Event;

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next()
	}
}
