//! Decoding of arbitrary input against real function descriptors

use arcabi::{Contract, Function};

/// Decodes `data[1..]` as the inputs of the function picked by `data[0]`.
///
/// Errors are expected; panics are not.
pub fn run_fuzzcase_on_contract_functions(funcs: &[Function], data: &[u8], output: bool) {
	let (pick, data) = match data.split_first() {
		Some(split) => split,
		None => return,
	};
	let func = &funcs[*pick as usize % funcs.len()];
	if output {
		println!("function: {}", func.signature());
		println!("input: {:?}", data);
	}
	match func.decode_input(data) {
		Ok(dec) => {
			if output {
				println!("decode: {:?}", dec);
			}
		}
		Err(e) => {
			if output {
				println!("error: {:?}", e);
			}
		}
	}
}

/// Loads the fixtures from the `res` directory and returns their functions,
/// sorted by signature.
pub fn load_abi() -> Vec<Function> {
	let fixtures: [&[u8]; 2] = [include_bytes!("../../res/erc20.abi"), include_bytes!("../../res/overloads.abi")];
	let mut funcs: Vec<Function> = fixtures
		.iter()
		.flat_map(|abi| Contract::load(*abi).map(|c| c.functions().cloned().collect::<Vec<_>>()).unwrap_or_default())
		.collect();
	funcs.sort_by_key(|f| f.signature());
	funcs
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::{load_abi, run_fuzzcase_on_contract_functions};

	#[test]
	fn fixtures_load() {
		assert_eq!(load_abi().len(), 18);
	}

	#[test]
	fn forged_lengths_do_not_panic() {
		let funcs = load_abi();
		let mut input = vec![0u8];
		input.extend_from_slice(&hex!(
			"
			0000000000000000000000000000000000000000000000000000000000000020
			ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff
		"
		));
		for pick in 0..funcs.len() as u8 {
			input[0] = pick;
			run_fuzzcase_on_contract_functions(&funcs, &input, true);
		}
	}

	#[test]
	fn short_inputs_do_not_panic() {
		let funcs = load_abi();
		for len in 0..70u8 {
			let input = (0..len).collect::<Vec<u8>>();
			run_fuzzcase_on_contract_functions(&funcs, &input, false);
		}
	}
}
