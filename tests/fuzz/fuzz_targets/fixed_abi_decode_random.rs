#![no_main]
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

use arcabi_tests::fuzztests::{load_abi, run_fuzzcase_on_contract_functions};

static FUNCTIONS: Lazy<Vec<arcabi::Function>> = Lazy::new(load_abi);

fuzz_target!(|data: &[u8]| {
	if data.len() > 2 {
		run_fuzzcase_on_contract_functions(&FUNCTIONS[0..], data, false);
	}
});
