//! Deployed contract handle dispatching calls by function name.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
	checksum::to_checksum,
	overload::{Candidate, CandidateSet},
	revert::check_revert,
	signature::{canonical_signature, selector_hex},
	Address, Bytes, Contract, Error, OverloadError, Param, Result, Selector, Uint, Value,
};

/// Transaction fields forwarded to the [`Caller`] with a call.
///
/// Unset fields are left to the transport's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
	/// Sender of the call.
	pub from: Option<Address>,
	/// Gas limit.
	pub gas: Option<Uint>,
	/// Gas price in wei.
	pub gas_price: Option<Uint>,
	/// Value sent with the call, in wei.
	pub value: Option<Uint>,
	/// Block to run the call against, latest when unset.
	pub block_number: Option<u64>,
}

/// Anything able to perform a read-only call against a contract.
///
/// Implemented for closures, so tests and simple transports can be plain
/// functions. Transport failures should be reported as [`Error::Transport`].
pub trait Caller {
	/// Sends `data` to the contract at `to` and returns the raw output.
	fn call(&self, to: &Address, data: Bytes, options: &CallOptions) -> Result<Bytes>;
}

impl<F> Caller for F
where
	F: Fn(&Address, Bytes, &CallOptions) -> Result<Bytes>,
{
	fn call(&self, to: &Address, data: Bytes, options: &CallOptions) -> Result<Bytes> {
		(self)(to, data, options)
	}
}

/// Decoded outputs of a call, addressable by position and by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
	outputs: Vec<Param>,
	values: Vec<Value>,
}

impl CallResult {
	/// Number of outputs.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether the function returns nothing.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Output at `index`.
	pub fn get(&self, index: usize) -> Option<&Value> {
		self.values.get(index)
	}

	/// First output named `name`.
	pub fn by_name(&self, name: &str) -> Option<&Value> {
		self.outputs.iter().position(|p| p.name == name).and_then(|i| self.values.get(i))
	}

	/// All outputs in declaration order.
	pub fn values(&self) -> &[Value] {
		&self.values
	}

	/// Consumes the result, returning the outputs.
	pub fn into_values(self) -> Vec<Value> {
		self.values
	}
}

/// Invocable function of an [`Instance`]: one function or a set of overloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
	candidates: CandidateSet,
}

impl Method {
	/// Function name.
	pub fn name(&self) -> &str {
		self.candidates.name()
	}

	/// Whether several functions share the name.
	pub fn is_overloaded(&self) -> bool {
		self.candidates.candidates().len() > 1
	}

	/// Candidates in ABI order.
	pub fn candidates(&self) -> &[Candidate] {
		self.candidates.candidates()
	}

	/// Picks the function the arguments should be dispatched to.
	pub fn resolve(&self, args: &[Option<Value>]) -> Result<&Candidate> {
		self.candidates.resolve(args).map_err(Into::into)
	}

	/// Resolves and encodes call data, selector included.
	pub fn encode(&self, args: &[Option<Value>]) -> Result<Bytes> {
		self.encode_for(self.resolve(args)?, args)
	}

	fn encode_for(&self, candidate: &Candidate, args: &[Option<Value>]) -> Result<Bytes> {
		let values = args
			.iter()
			.enumerate()
			.map(|(position, arg)| {
				arg.clone().ok_or_else(|| OverloadError::ArgumentError {
					address: *self.candidates.address(),
					name: self.name().to_owned(),
					position,
				})
			})
			.collect::<core::result::Result<Vec<_>, _>>()?;
		candidate.function.encode_input_with_selector(&candidate.selector, &values)
	}

	/// Resolves, encodes, performs the call with default options and decodes
	/// the outputs.
	///
	/// A standard revert payload is reported as [`Error::ContractRevert`].
	pub fn call<C>(&self, caller: &C, args: &[Option<Value>]) -> Result<CallResult>
	where
		C: Caller + ?Sized,
	{
		self.call_with(caller, args, &CallOptions::default())
	}

	/// Same as [`Method::call`], forwarding `options` to the caller.
	pub fn call_with<C>(&self, caller: &C, args: &[Option<Value>], options: &CallOptions) -> Result<CallResult>
	where
		C: Caller + ?Sized,
	{
		let candidate = self.resolve(args)?;
		let data = self.encode_for(candidate, args)?;
		let address = self.candidates.address();
		debug!(
			contract = %to_checksum(address),
			selector = %selector_hex(&candidate.selector),
			len = data.len(),
			block = ?options.block_number,
			"calling contract"
		);

		let output = caller.call(address, data, options)?;
		check_revert(&output)?;

		let values = candidate.function.decode_output(&output)?;
		Ok(CallResult { outputs: candidate.function.outputs.clone(), values })
	}
}

/// Contract deployed at an address, with one [`Method`] per function name.
///
/// Every function is also reachable on its own by canonical signature and by
/// selector, bypassing overload resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
	address: Address,
	contract: Contract,
	methods: BTreeMap<String, Method>,
	by_signature: BTreeMap<String, Method>,
	by_selector: BTreeMap<Selector, String>,
}

impl Instance {
	/// Builds methods and caches selectors for every function of the ABI.
	pub fn new(address: Address, contract: Contract) -> Self {
		let mut methods = BTreeMap::new();
		let mut by_signature = BTreeMap::new();
		let mut by_selector = BTreeMap::new();

		for (name, functions) in &contract.functions {
			let candidates = CandidateSet::new(address, name.clone(), functions.iter().cloned());
			for candidate in candidates.candidates() {
				let kinds = candidate.function.inputs.iter().map(|p| p.kind.clone()).collect::<Vec<_>>();
				let signature = canonical_signature(name, &kinds);
				let single = CandidateSet::new(address, name.clone(), Some(candidate.function.clone()));
				by_selector.insert(candidate.selector, signature.clone());
				by_signature.insert(signature, Method { candidates: single });
			}
			methods.insert(name.clone(), Method { candidates });
		}

		Instance { address, contract, methods, by_signature, by_selector }
	}

	/// Contract address.
	pub fn address(&self) -> &Address {
		&self.address
	}

	/// Contract ABI.
	pub fn contract(&self) -> &Contract {
		&self.contract
	}

	/// Method named `name`.
	pub fn method(&self, name: &str) -> Result<&Method> {
		self.methods.get(name).ok_or_else(|| Error::InvalidName(name.to_owned()))
	}

	/// Single function with canonical signature `signature`, e.g.
	/// `transfer(address,uint256)`.
	pub fn method_by_signature(&self, signature: &str) -> Result<&Method> {
		self.by_signature.get(signature).ok_or_else(|| Error::InvalidName(signature.to_owned()))
	}

	/// Single function whose selector is `selector`.
	pub fn method_by_selector(&self, selector: &Selector) -> Result<&Method> {
		self.by_selector
			.get(selector)
			.and_then(|signature| self.by_signature.get(signature))
			.ok_or_else(|| Error::InvalidName(selector_hex(selector)))
	}

	/// All methods, by name.
	pub fn methods(&self) -> impl Iterator<Item = &Method> {
		self.methods.values()
	}

	/// Calls the method named `name`.
	pub fn call<C>(&self, caller: &C, name: &str, args: &[Option<Value>]) -> Result<CallResult>
	where
		C: Caller + ?Sized,
	{
		self.method(name)?.call(caller, args)
	}

	/// Calls the method named `name` with explicit call options.
	pub fn call_with<C>(
		&self,
		caller: &C,
		name: &str,
		args: &[Option<Value>],
		options: &CallOptions,
	) -> Result<CallResult>
	where
		C: Caller + ?Sized,
	{
		self.method(name)?.call_with(caller, args, options)
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use hex_literal::hex;

	use super::{CallOptions, CallResult, Caller, Instance};
	use crate::{
		encode, revert::ERROR_SELECTOR, short_signature, Address, Bytes, Contract, Error, Integer, OverloadError, ParamType,
		Result, Uint, Value,
	};

	const ABI: &str = r#"[
		{"type":"function","name":"balanceOf","inputs":[{"name":"owner","type":"address"}],
		 "outputs":[{"name":"balance","type":"uint256"}],"stateMutability":"view"},
		{"type":"function","name":"f","inputs":[{"name":"a","type":"uint256"}],
		 "outputs":[{"name":"","type":"uint8"}],"stateMutability":"pure"},
		{"type":"function","name":"f","inputs":[{"name":"a","type":"string"}],
		 "outputs":[{"name":"","type":"uint8"}],"stateMutability":"pure"},
		{"type":"function","name":"pair","inputs":[],
		 "outputs":[{"name":"ok","type":"bool"},{"name":"label","type":"string"}],"stateMutability":"view"}
	]"#;

	fn instance() -> Instance {
		Instance::new(Address::from([0x22u8; 20]), Contract::load(ABI.as_bytes()).unwrap())
	}

	fn owner() -> Option<Value> {
		Some(Value::from("0x1111111111111111111111111111111111111111"))
	}

	#[test]
	fn methods_are_built_per_name() {
		let instance = instance();
		assert_eq!(instance.methods().count(), 3);
		assert!(instance.method("f").unwrap().is_overloaded());
		assert!(!instance.method("pair").unwrap().is_overloaded());
		assert!(matches!(instance.method("g"), Err(Error::InvalidName(_))));
	}

	#[test]
	fn encodes_with_cached_selector() {
		let method = instance().method("balanceOf").unwrap().clone();
		let encoded = method.encode(&[owner()]).unwrap();
		let expected = hex!("70a082310000000000000000000000001111111111111111111111111111111111111111");
		assert_eq!(encoded, expected);
	}

	#[test]
	fn call_decodes_outputs() {
		let seen = RefCell::new(Vec::new());
		let caller = |to: &Address, data: Bytes, _: &CallOptions| -> Result<Bytes> {
			seen.borrow_mut().push((*to, data));
			encode(&[Value::Int(Integer::from(1000u32))], &[ParamType::Uint(256)])
		};

		let result = instance().call(&caller, "balanceOf", &[owner()]).unwrap();
		assert_eq!(result.get(0), Some(&Value::Int(Integer::from(1000u32))));
		assert_eq!(result.by_name("balance"), result.get(0));
		assert_eq!(seen.borrow()[0].0, Address::from([0x22u8; 20]));
	}

	#[test]
	fn call_result_by_name() {
		let caller = |_: &Address, _: Bytes, _: &CallOptions| {
			encode(&[Value::Bool(true), Value::from("hi")], &[ParamType::Bool, ParamType::String])
		};
		let result: CallResult = instance().call(&caller, "pair", &[]).unwrap();
		assert_eq!(result.len(), 2);
		assert_eq!(result.by_name("label"), Some(&Value::from("hi")));
		assert_eq!(result.by_name("missing"), None);
		assert_eq!(result.into_values(), vec![Value::Bool(true), Value::from("hi")]);
	}

	#[test]
	fn overloads_dispatch_to_resolved_selector() {
		let instance = instance();
		let method = instance.method("f").unwrap();
		let by_number = method.encode(&[Some(Value::Int(Integer::from(1u64)))]).unwrap();
		let by_string = method.encode(&[Some(Value::from("one"))]).unwrap();
		assert_eq!(by_number[..4], method.candidates()[0].selector);
		assert_eq!(by_string[..4], method.candidates()[1].selector);
	}

	#[test]
	fn revert_reason_is_reported() {
		let caller = |_: &Address, _: Bytes, _: &CallOptions| -> Result<Bytes> {
			let mut payload = ERROR_SELECTOR.to_vec();
			payload.extend(encode(&[Value::from("Insufficient balance")], &[ParamType::String])?);
			Ok(payload)
		};
		let err = instance().call(&caller, "balanceOf", &[owner()]).unwrap_err();
		assert!(matches!(err, Error::ContractRevert(reason) if reason == "Insufficient balance"));
	}

	#[test]
	fn transport_errors_propagate() {
		struct Offline;

		impl Caller for Offline {
			fn call(&self, _: &Address, _: Bytes, _: &CallOptions) -> Result<Bytes> {
				Err(Error::Transport("connection refused".into()))
			}
		}

		let err = instance().call(&Offline, "balanceOf", &[owner()]).unwrap_err();
		assert!(matches!(err, Error::Transport(_)));
	}

	#[test]
	fn wrong_arity_on_single_function() {
		let caller = |_: &Address, _: Bytes, _: &CallOptions| -> Result<Bytes> { unreachable!() };
		let err = instance().call(&caller, "balanceOf", &[]).unwrap_err();
		assert!(matches!(err, Error::Overload(OverloadError::ArityMismatch { min: 1, max: 1, actual: 0, .. })));

		let err = instance().method("balanceOf").unwrap().encode(&[None]).unwrap_err();
		assert!(matches!(err, Error::Overload(OverloadError::ArgumentError { position: 0, .. })));
	}

	#[test]
	fn options_reach_the_caller() {
		let seen = RefCell::new(None);
		let caller = |_: &Address, _: Bytes, options: &CallOptions| -> Result<Bytes> {
			*seen.borrow_mut() = Some(options.clone());
			encode(&[Value::Int(Integer::from(1u8))], &[ParamType::Uint(256)])
		};

		let options = CallOptions {
			from: Some(Address::from([0x33u8; 20])),
			gas: Some(Uint::from(100_000u64)),
			block_number: Some(12),
			..Default::default()
		};
		instance().call_with(&caller, "balanceOf", &[owner()], &options).unwrap();
		assert_eq!(seen.borrow().as_ref(), Some(&options));

		instance().call(&caller, "balanceOf", &[owner()]).unwrap();
		assert_eq!(seen.borrow().as_ref(), Some(&CallOptions::default()));
	}

	#[test]
	fn explicit_overload_by_signature_and_selector() {
		let instance = instance();
		let by_string = instance.method_by_signature("f(string)").unwrap();
		assert!(!by_string.is_overloaded());

		let encoded = by_string.encode(&[Some(Value::from("one"))]).unwrap();
		assert_eq!(encoded[..4], short_signature("f", &[ParamType::String]));

		let selector = short_signature("f", &[ParamType::Uint(256)]);
		let by_uint = instance.method_by_selector(&selector).unwrap();
		assert_eq!(by_uint.candidates()[0].function.signature(), "f(uint256):(uint8)");
		let encoded = by_uint.encode(&[Some(Value::Int(Integer::from(1u64)))]).unwrap();
		assert_eq!(encoded[..4], selector);

		assert!(matches!(instance.method_by_signature("f(bool)"), Err(Error::InvalidName(_))));
		assert!(matches!(
			instance.method_by_selector(&[0, 0, 0, 0]),
			Err(Error::InvalidName(ref s)) if s == "0x00000000"
		));
	}
}
