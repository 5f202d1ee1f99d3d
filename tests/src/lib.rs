//! Test crate

#![deny(missing_docs)]
#![deny(dead_code)]
#![deny(unused_imports)]

pub mod fuzztests;

#[cfg(test)]
mod contracts {
	use arcabi::{
		encode, revert::ERROR_SELECTOR, token::arguments_from_json, Address, Bytes, CallOptions, Contract, Error,
		ErrorKind, Hash, Instance, Integer, OverloadError, ParamType, RawLog, Result, Value,
	};
	use hex_literal::hex;
	use serde_json::json;

	const TOKEN: [u8; 20] = [0x22; 20];
	const OWNER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

	fn erc20() -> Contract {
		Contract::load(&include_bytes!("../../res/erc20.abi")[..]).unwrap()
	}

	fn overloads() -> Instance {
		let contract = Contract::load(&include_bytes!("../../res/overloads.abi")[..]).unwrap();
		Instance::new(Address::from(TOKEN), contract)
	}

	fn big(value: u64) -> Option<Value> {
		Some(Value::Int(Integer::from(value)))
	}

	fn resolved(instance: &Instance, name: &str, args: &[Option<Value>]) -> String {
		instance.method(name).unwrap().resolve(args).unwrap().function.signature()
	}

	#[test]
	fn erc20_loads() {
		let contract = erc20();
		assert_eq!(contract.functions().count(), 9);
		assert_eq!(contract.events().count(), 2);
		assert!(contract.receive);
		assert!(!contract.fallback);
		assert!(contract.function("balanceOf").unwrap().state_mutability.is_read_only());
		assert!(!contract.function("transfer").unwrap().state_mutability.is_read_only());
	}

	#[test]
	fn erc20_selectors() {
		let contract = erc20();
		assert_eq!(contract.function("transfer").unwrap().short_signature(), hex!("a9059cbb"));
		assert_eq!(contract.function("balanceOf").unwrap().short_signature(), hex!("70a08231"));
		assert_eq!(
			contract.event("Transfer").unwrap().signature(),
			Hash::from(hex!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"))
		);
	}

	#[test]
	fn balance_of_through_instance() {
		let instance = Instance::new(Address::from(TOKEN), erc20());
		let caller = |to: &Address, data: Bytes, _: &CallOptions| -> Result<Bytes> {
			assert_eq!(to, &Address::from(TOKEN));
			assert_eq!(
				data,
				hex!(
					"
					70a08231
					0000000000000000000000005aaeb6053f3e94c9b9a09f33669435e7ef1beaed
				"
				)
				.to_vec()
			);
			encode(&[Value::Int(Integer::from(1000u64))], &[ParamType::Uint(256)])
		};

		let result = instance.call(&caller, "balanceOf", &[Some(Value::from(OWNER))]).unwrap();
		assert_eq!(result.len(), 1);
		assert_eq!(result.by_name("balance"), Some(&Value::Int(Integer::from(1000u64))));
		assert_eq!(result.get(0), result.by_name("balance"));
	}

	#[test]
	fn decimals_keep_their_width() {
		let instance = Instance::new(Address::from(TOKEN), erc20());
		let caller = |_: &Address, _: Bytes, _: &CallOptions| -> Result<Bytes> {
			Ok(hex!("0000000000000000000000000000000000000000000000000000000000000012").to_vec())
		};

		let decimals = instance.call(&caller, "decimals", &[]).unwrap().into_values().remove(0).into_int().unwrap();
		assert_eq!(decimals, Integer::from(18u8));
		assert_eq!(decimals.bits(), 8);
		assert!(decimals.is_small());
	}

	#[test]
	fn reverted_transfer() {
		let instance = Instance::new(Address::from(TOKEN), erc20());
		let caller = |_: &Address, _: Bytes, _: &CallOptions| -> Result<Bytes> {
			let reason = encode(&[Value::from("Insufficient balance")], &[ParamType::String])?;
			Ok(ERROR_SELECTOR.iter().copied().chain(reason).collect())
		};

		let err = instance.call(&caller, "transfer", &[Some(Value::from(OWNER)), big(1)]).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Revert);
		assert!(matches!(err, Error::ContractRevert(ref reason) if reason == "Insufficient balance"));
	}

	#[test]
	fn transport_errors_pass_through() {
		let instance = Instance::new(Address::from(TOKEN), erc20());
		let caller =
			|_: &Address, _: Bytes, _: &CallOptions| -> Result<Bytes> { Err(Error::Transport("connection refused".into())) };

		let err = instance.call(&caller, "totalSupply", &[]).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Transport);
		assert_eq!(err.to_string(), "Transport error: connection refused");
	}

	#[test]
	fn invalid_address_argument() {
		let instance = Instance::new(Address::from(TOKEN), erc20());
		let caller = |_: &Address, _: Bytes, _: &CallOptions| -> Result<Bytes> { unreachable!() };

		let err = instance.call(&caller, "balanceOf", &[Some(Value::from("0x1234"))]).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Type);
	}

	#[test]
	fn overloads_by_arity_and_category() {
		let instance = overloads();
		assert_eq!(resolved(&instance, "f", &[big(1)]), "f(uint256):(uint256)");
		assert_eq!(resolved(&instance, "f", &[Some(Value::from("one"))]), "f(string):(string)");
		assert_eq!(resolved(&instance, "f", &[big(1), big(2)]), "f(uint256,uint256):(uint256)");

		let err = instance.method("f").unwrap().resolve(&[]).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Overload);
		assert!(matches!(err, Error::Overload(OverloadError::ArityMismatch { min: 1, max: 2, actual: 0, .. })));
	}

	#[test]
	fn overloads_by_fixed_length() {
		let instance = overloads();
		let array = |n: u64| Some(Value::Array((1..=n).map(|i| Value::Int(Integer::from(i))).collect()));
		assert_eq!(resolved(&instance, "g", &[array(3)]), "g(uint256[3]):(uint256)");
		assert_eq!(resolved(&instance, "g", &[array(4)]), "g(uint256[]):(uint256)");

		let k = instance.method("k").unwrap();
		assert_eq!(k.resolve(&[Some(Value::Bytes(vec![1; 4]))]).unwrap().selector, hex!("c1a42aeb"));
		assert_eq!(k.resolve(&[Some(Value::Bytes(vec![1; 8]))]).unwrap().selector, hex!("7784340a"));
		assert!(matches!(
			k.resolve(&[Some(Value::Bytes(vec![1; 5]))]),
			Err(Error::Overload(OverloadError::LengthMismatch { .. }))
		));
	}

	#[test]
	fn explicit_overloads_skip_resolution() {
		let instance = overloads();
		let k8 = instance.method_by_selector(&hex!("7784340a")).unwrap();
		assert_eq!(k8.name(), "k");
		assert_eq!(k8.candidates().len(), 1);
		assert_eq!(k8.encode(&[Some(Value::Bytes(vec![1; 8]))]).unwrap()[..4], hex!("7784340a"));

		let g = instance.method_by_signature("g(uint256[])").unwrap();
		let three = Some(Value::Array((1..=3u64).map(|i| Value::Int(Integer::from(i))).collect()));
		assert_eq!(g.resolve(&[three]).unwrap().function.signature(), "g(uint256[]):(uint256)");
	}

	#[test]
	fn balance_at_block() {
		let instance = Instance::new(Address::from(TOKEN), erc20());
		let caller = |_: &Address, _: Bytes, options: &CallOptions| -> Result<Bytes> {
			let balance = match options.block_number {
				Some(block) if block < 100 => 0u64,
				_ => 1000,
			};
			encode(&[Value::Int(Integer::from(balance))], &[ParamType::Uint(256)])
		};

		let at = |block_number| {
			let options = CallOptions { block_number, ..Default::default() };
			instance.call_with(&caller, "balanceOf", &[Some(Value::from(OWNER))], &options).unwrap().into_values()
		};
		assert_eq!(at(Some(10)), vec![Value::Int(Integer::from(0u64))]);
		assert_eq!(at(None), vec![Value::Int(Integer::from(1000u64))]);
	}

	#[test]
	fn address_looking_strings() {
		let instance = overloads();
		assert_eq!(resolved(&instance, "h", &[Some(Value::from(OWNER))]), "h(address)");
		assert_eq!(resolved(&instance, "h", &[Some(Value::from("label"))]), "h(string)");
	}

	#[test]
	fn overloads_from_json_arguments() {
		let instance = overloads();
		let args = arguments_from_json(&json!([[{ "int": "1" }, { "int": "2" }, { "int": "3" }]])).unwrap();
		let data = instance.method("g").unwrap().encode(&args).unwrap();
		assert_eq!(
			data,
			hex!(
				"
				d14d385d
				0000000000000000000000000000000000000000000000000000000000000001
				0000000000000000000000000000000000000000000000000000000000000002
				0000000000000000000000000000000000000000000000000000000000000003
			"
			)
			.to_vec()
		);

		let args = arguments_from_json(&json!(["one", null])).unwrap();
		let err = instance.method("f").unwrap().encode(&args).unwrap_err();
		assert!(matches!(err, Error::Overload(OverloadError::ArgumentError { position: 1, .. })));
	}

	#[test]
	fn transfer_log() {
		let event = erc20().event("Transfer").unwrap().clone();
		let log = RawLog {
			topics: vec![
				event.signature(),
				Hash::from(hex!("0000000000000000000000005aaeb6053f3e94c9b9a09f33669435e7ef1beaed")),
				Hash::from(hex!("0000000000000000000000002222222222222222222222222222222222222222")),
			],
			data: hex!("00000000000000000000000000000000000000000000000000000000000003e8").to_vec(),
		};

		let params = event.parse_log(log).unwrap().params;
		let names = params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
		assert_eq!(names, vec!["from", "to", "value"]);
		assert_eq!(params[0].value.to_string(), OWNER);
		assert_eq!(params[1].value, Value::Address(Address::from(TOKEN)));
		assert_eq!(params[2].value, Value::Int(Integer::from(1000u64)));
	}
}

#[cfg(test)]
mod codec {
	use arcabi::{
		decode, decode_string_hex, encode, Error, Function, Integer, Param, ParamType, StateMutability, Value,
	};
	use hex_literal::hex;

	fn function(inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Function {
		let params =
			|kinds: Vec<ParamType>| kinds.into_iter().map(|kind| Param { name: "".to_owned(), kind }).collect();
		Function {
			name: "probe".to_owned(),
			inputs: params(inputs),
			outputs: params(outputs),
			state_mutability: StateMutability::View,
		}
	}

	#[test]
	fn elementary_round_trips() {
		let types = vec![
			ParamType::Bool,
			ParamType::Address,
			ParamType::Uint(256),
			ParamType::Int(32),
			ParamType::FixedBytes(3),
			ParamType::Bytes,
			ParamType::String,
			ParamType::Array(ParamType::Uint(8).into()),
			ParamType::FixedArray(ParamType::String.into(), 2),
		];
		let values = vec![
			Value::Bool(true),
			Value::Address([0x11u8; 20].into()),
			Value::Int(Integer::from(u64::MAX)),
			Value::Int(Integer::from(-5i32)),
			Value::FixedBytes(vec![1, 2, 3]),
			Value::Bytes(vec![0xaa; 40]),
			Value::from("gavofyork"),
			Value::Array(vec![Value::Int(Integer::from(1u8)), Value::Int(Integer::from(2u8))]),
			Value::Array(vec![Value::from("a"), Value::from("")]),
		];

		let encoded = encode(&values, &types).unwrap();
		assert_eq!(decode(&types, &encoded).unwrap(), values);
	}

	#[test]
	fn call_data_as_hex() {
		let probe = function(vec![ParamType::String], vec![ParamType::String]);
		let encoded = probe.encode_hex(&[Value::from("hello")], Some(hex!("12345678"))).unwrap();
		assert_eq!(
			encoded,
			"0x12345678\
			 0000000000000000000000000000000000000000000000000000000000000020\
			 0000000000000000000000000000000000000000000000000000000000000005\
			 68656c6c6f000000000000000000000000000000000000000000000000000000"
		);
		assert_eq!(probe.decode_hex(&format!("0x{}", &encoded[10..])).unwrap(), vec![Value::from("hello")]);
	}

	#[test]
	fn empty_values_share_one_target() {
		let types = vec![ParamType::String, ParamType::Bytes, ParamType::Array(ParamType::Bool.into())];
		let values = vec![Value::from(""), Value::Bytes(vec![]), Value::Array(vec![])];
		let encoded = encode(&values, &types).unwrap();
		assert_eq!(
			encoded,
			hex!(
				"
				0000000000000000000000000000000000000000000000000000000000000060
				0000000000000000000000000000000000000000000000000000000000000060
				0000000000000000000000000000000000000000000000000000000000000060
				0000000000000000000000000000000000000000000000000000000000000000
			"
			)
			.to_vec()
		);
		assert_eq!(decode(&types, &encoded).unwrap(), values);
	}

	#[test]
	fn sign_of_the_top_bit() {
		let word = hex!("8000000000000000000000000000000000000000000000000000000000000000");
		let unsigned = decode(&[ParamType::Uint(256)], &word).unwrap().remove(0).into_int().unwrap();
		let signed = decode(&[ParamType::Int(256)], &word).unwrap().remove(0).into_int().unwrap();
		assert_eq!(unsigned.to_string(), "57896044618658097711785492504343953926634992332820282019728792003956564819968");
		assert_eq!(signed.to_string(), "-57896044618658097711785492504343953926634992332820282019728792003956564819968");
	}

	#[test]
	fn revert_body_as_string() {
		let body = "0000000000000000000000000000000000000000000000000000000000000020\
		            0000000000000000000000000000000000000000000000000000000000000014\
		            496e73756666696369656e742062616c616e6365000000000000000000000000";
		assert_eq!(decode_string_hex(body, 0).unwrap(), "Insufficient balance");
		assert!(matches!(
			decode_string_hex(&body[..128], 0),
			Err(Error::ReadOutOfBounds { from: 64, to: 84, len: 64 })
		));
	}

	#[test]
	fn foreign_producer_layout() {
		// string[] as emitted by solc: element pointers relative to the array body
		let data = hex!(
			"
			0000000000000000000000000000000000000000000000000000000000000020
			0000000000000000000000000000000000000000000000000000000000000002
			0000000000000000000000000000000000000000000000000000000000000040
			0000000000000000000000000000000000000000000000000000000000000080
			0000000000000000000000000000000000000000000000000000000000000003
			6f6e650000000000000000000000000000000000000000000000000000000000
			0000000000000000000000000000000000000000000000000000000000000003
			74776f0000000000000000000000000000000000000000000000000000000000
		"
		);
		let types = [ParamType::Array(ParamType::String.into())];
		let expected = vec![Value::Array(vec![Value::from("one"), Value::from("two")])];
		assert_eq!(decode(&types, &data).unwrap(), expected);
		assert_eq!(encode(&expected, &types).unwrap(), data.to_vec());
	}
}
