use std::fs::File;

use anyhow::anyhow;
use arcabi::{
	decode, encode, long_signature,
	param_type::{ParamType, Reader},
	revert::decode_revert_reason,
	selector_hex, short_signature,
	token::{arguments_from_json, LenientTokenizer, StrictTokenizer, Tokenizer},
	util::hex_to_bytes,
	Address, Contract, Event, Function, Hash, Instance, Value,
};
use itertools::Itertools;
use structopt::StructOpt;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(StructOpt, Debug)]
/// Ethereum ABI coder.
enum Opt {
	/// Encode ABI call.
	Encode(Encode),
	/// Decode ABI call result.
	Decode(Decode),
	/// Pick the overload of a function matching JSON arguments.
	Resolve {
		abi_path: String,
		name: String,
		/// Arguments as a JSON array.
		args: String,
		/// Contract address named in resolution errors.
		#[structopt(long, default_value = "0x0000000000000000000000000000000000000000")]
		address: String,
	},
	/// Extract the reason of a reverted call.
	Revert { data: String },
	/// Compute the selector of a function signature.
	Selector { signature: String },
}

#[derive(StructOpt, Debug)]
enum Encode {
	/// Load function from JSON ABI file.
	Function {
		abi_path: String,
		function_name_or_signature: String,
		#[structopt(short, number_of_values = 1)]
		params: Vec<String>,
		/// Allow short representation of input params.
		#[structopt(short, long)]
		lenient: bool,
	},
	/// Specify types of input params inline.
	Params {
		/// Pairs of types directly followed by params in the form:
		///
		/// -v <type1> <param1> -v <type2> <param2> ...
		#[structopt(short = "v", name = "type-or-param", number_of_values = 2, allow_hyphen_values = true)]
		params: Vec<String>,
		/// Allow short representation of input params (numbers are in decimal form).
		#[structopt(short, long)]
		lenient: bool,
	},
	/// Resolve the overload from JSON arguments and encode the call.
	Call {
		abi_path: String,
		name: String,
		/// Arguments as a JSON array.
		args: String,
	},
}

#[derive(StructOpt, Debug)]
enum Decode {
	/// Load function from JSON ABI file.
	Function { abi_path: String, function_name_or_signature: String, data: String },
	/// Specify types of input params inline.
	Params {
		#[structopt(short, name = "type", number_of_values = 1)]
		types: Vec<String>,
		data: String,
	},
	/// Decode event log.
	Log {
		abi_path: String,
		event_name_or_signature: String,
		#[structopt(short = "l", name = "topic", number_of_values = 1)]
		topics: Vec<String>,
		data: String,
	},
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr))
		.with(EnvFilter::from_default_env())
		.init();

	println!("{}", execute(std::env::args())?);

	Ok(())
}

fn execute<I>(args: I) -> anyhow::Result<String>
where
	I: IntoIterator,
	I::Item: Into<std::ffi::OsString> + Clone,
{
	let opt = Opt::from_iter(args);
	debug!(?opt, "executing");

	match opt {
		Opt::Encode(Encode::Function { abi_path, function_name_or_signature, params, lenient }) => {
			encode_input(&abi_path, &function_name_or_signature, &params, lenient)
		}
		Opt::Encode(Encode::Params { params, lenient }) => encode_params(&params, lenient),
		Opt::Encode(Encode::Call { abi_path, name, args }) => encode_call(&abi_path, &name, &args),
		Opt::Decode(Decode::Function { abi_path, function_name_or_signature, data }) => {
			decode_call_output(&abi_path, &function_name_or_signature, &data)
		}
		Opt::Decode(Decode::Params { types, data }) => decode_params(&types, &data),
		Opt::Decode(Decode::Log { abi_path, event_name_or_signature, topics, data }) => {
			decode_log(&abi_path, &event_name_or_signature, &topics, &data)
		}
		Opt::Resolve { abi_path, name, args, address } => resolve(&abi_path, &name, &args, &address),
		Opt::Revert { data } => revert_reason(&data),
		Opt::Selector { signature } => selector(&signature),
	}
}

fn load_contract(path: &str) -> anyhow::Result<Contract> {
	let file = File::open(path)?;
	Ok(Contract::load(file)?)
}

/// Splits `name(type1,type2)` into the name and the parsed types.
fn parse_signature(signature: &str) -> anyhow::Result<(&str, Vec<ParamType>)> {
	let (name, rest) = signature.split_once('(').ok_or_else(|| anyhow!("invalid signature `{}`", signature))?;
	let types = rest.strip_suffix(')').ok_or_else(|| anyhow!("invalid signature `{}`", signature))?;
	let types = match types.trim() {
		"" => vec![],
		types => types.split(',').map(|t| Reader::read(t.trim())).collect::<Result<_, _>>()?,
	};
	Ok((name, types))
}

fn load_function(path: &str, name_or_signature: &str) -> anyhow::Result<Function> {
	let contract = load_contract(path)?;
	let params_start = name_or_signature.find('(');

	match params_start {
		// It's a signature
		Some(params_start) => {
			let name = &name_or_signature[..params_start];

			contract
				.functions_by_name(name)?
				.iter()
				.find(|f| f.signature() == name_or_signature)
				.cloned()
				.ok_or_else(|| anyhow!("invalid function signature `{}`", name_or_signature))
		}

		// It's a name
		None => {
			let functions = contract.functions_by_name(name_or_signature)?;
			match functions.as_slice() {
				[function] => Ok(function.clone()),
				_ => Err(anyhow!(
					"More than one function found for name `{}`, try providing the full signature",
					name_or_signature
				)),
			}
		}
	}
}

fn load_event(path: &str, name_or_signature: &str) -> anyhow::Result<Event> {
	let contract = load_contract(path)?;

	match name_or_signature.contains('(') {
		// It's a signature.
		true => {
			let (name, types) = parse_signature(name_or_signature)?;
			let signature = long_signature(name, &types);
			contract
				.events_by_name(name)?
				.iter()
				.find(|event| event.signature() == signature)
				.cloned()
				.ok_or_else(|| anyhow!("Invalid signature `{:?}`", signature))
		}

		// It's a name.
		false => {
			let events = contract.events_by_name(name_or_signature)?;
			match events.as_slice() {
				[event] => Ok(event.clone()),
				_ => Err(anyhow!(
					"More than one event found for name `{}`, try providing the full signature",
					name_or_signature
				)),
			}
		}
	}
}

fn parse_values(params: &[(ParamType, &str)], lenient: bool) -> anyhow::Result<Vec<Value>> {
	params
		.iter()
		.map(|&(ref param, value)| match lenient {
			true => LenientTokenizer::tokenize(param, value),
			false => StrictTokenizer::tokenize(param, value),
		})
		.collect::<Result<_, _>>()
		.map_err(From::from)
}

fn encode_input(path: &str, name_or_signature: &str, values: &[String], lenient: bool) -> anyhow::Result<String> {
	let function = load_function(path, name_or_signature)?;
	if values.len() != function.inputs.len() {
		return Err(anyhow!("`{}` takes {} params, got {}", function.signature(), function.inputs.len(), values.len()));
	}

	let params: Vec<_> =
		function.inputs.iter().map(|param| param.kind.clone()).zip(values.iter().map(|v| v as &str)).collect();

	let values = parse_values(&params, lenient)?;
	let result = function.encode_input(&values)?;

	Ok(hex::encode(&result))
}

fn encode_params(params: &[String], lenient: bool) -> anyhow::Result<String> {
	if params.len() % 2 != 0 {
		return Err(anyhow!("every type must be followed by a param"));
	}

	let params = params
		.iter()
		.tuples::<(_, _)>()
		.map(|(x, y)| Reader::read(x).map(|z| (z, y.as_str())))
		.collect::<Result<Vec<_>, _>>()?;

	let values = parse_values(params.as_slice(), lenient)?;
	let types: Vec<ParamType> = params.into_iter().map(|(param, _)| param).collect();
	let result = encode(&values, &types)?;

	Ok(hex::encode(&result))
}

fn load_instance(path: &str, address: &str) -> anyhow::Result<Instance> {
	let address: Address = arcabi::checksum::parse_address(address)?;
	Ok(Instance::new(address, load_contract(path)?))
}

fn encode_call(path: &str, name: &str, args: &str) -> anyhow::Result<String> {
	let instance = load_instance(path, "0x0000000000000000000000000000000000000000")?;
	let args = arguments_from_json(&serde_json::from_str(args)?)?;
	let result = instance.method(name)?.encode(&args)?;

	Ok(hex::encode(&result))
}

fn resolve(path: &str, name: &str, args: &str, address: &str) -> anyhow::Result<String> {
	let instance = load_instance(path, address)?;
	let args = arguments_from_json(&serde_json::from_str(args)?)?;
	let candidate = instance.method(name)?.resolve(&args)?;

	Ok(format!("{} {}", selector_hex(&candidate.selector), candidate.function.signature()))
}

fn decode_call_output(path: &str, name_or_signature: &str, data: &str) -> anyhow::Result<String> {
	let function = load_function(path, name_or_signature)?;
	let data = hex_to_bytes(data)?;
	let values = function.decode_output(&data)?;

	let result = function
		.outputs
		.iter()
		.zip(values.iter())
		.map(|(ty, value)| format!("{} {}", ty.kind, value))
		.collect::<Vec<String>>()
		.join("\n");

	Ok(result)
}

fn decode_params(types: &[String], data: &str) -> anyhow::Result<String> {
	let types: Vec<ParamType> = types.iter().map(|s| Reader::read(s)).collect::<Result<_, _>>()?;

	let data = hex_to_bytes(data)?;

	let values = decode(&types, &data)?;

	let result =
		types.iter().zip(values.iter()).map(|(ty, value)| format!("{} {}", ty, value)).collect::<Vec<String>>().join("\n");

	Ok(result)
}

fn decode_log(path: &str, name_or_signature: &str, topics: &[String], data: &str) -> anyhow::Result<String> {
	let event = load_event(path, name_or_signature)?;
	let topics: Vec<Hash> = topics
		.iter()
		.map(|t| match hex_to_bytes(t)? {
			bytes if bytes.len() == 32 => Ok(Hash::from_slice(&bytes)),
			_ => Err(anyhow!("topic `{}` is not 32 bytes long", t)),
		})
		.collect::<anyhow::Result<_>>()?;
	let data = hex_to_bytes(data)?;
	let decoded = event.parse_log((topics, data).into())?;

	let result = decoded
		.params
		.into_iter()
		.map(|log_param| format!("{} {}", log_param.name, log_param.value))
		.collect::<Vec<String>>()
		.join("\n");

	Ok(result)
}

fn revert_reason(data: &str) -> anyhow::Result<String> {
	let data = hex_to_bytes(data)?;
	decode_revert_reason(&data).ok_or_else(|| anyhow!("not a revert payload"))
}

fn selector(signature: &str) -> anyhow::Result<String> {
	let (name, types) = parse_signature(signature)?;
	Ok(selector_hex(&short_signature(name, &types)))
}
