//! Runtime selection among functions sharing a name.
//!
//! Resolution is a funnel: arity, then argument categories, then exact
//! lengths for `T[n]` and `bytesN` parameters, then a preference for
//! candidates whose fixed lengths matched. Each stage either narrows the
//! candidates down to one, continues, or fails with a specific
//! [`OverloadError`].

mod category;

pub use category::{classify, length_of, looks_like_address, Arity, Base, Category, Shape};

use tracing::debug;

use crate::{checksum::to_checksum, signature::selector_hex, Address, Function, OverloadError, Selector, Value};

/// One function of a [`CandidateSet`] with everything resolution needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	/// Function descriptor.
	pub function: Function,
	/// Cached selector.
	pub selector: Selector,
	/// Declared shape of each input.
	pub shapes: Vec<Shape>,
}

impl Candidate {
	/// Prepares a function for resolution.
	pub fn new(function: Function) -> Self {
		let selector = function.short_signature();
		let shapes = function.inputs.iter().map(|p| Shape::from(&p.kind)).collect();
		Candidate { function, selector, shapes }
	}
}

/// Functions sharing one name on one contract, in ABI order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
	address: Address,
	name: String,
	candidates: Vec<Candidate>,
}

impl CandidateSet {
	/// Creates a candidate set for the function `name` of the contract at `address`.
	pub fn new(address: Address, name: impl Into<String>, functions: impl IntoIterator<Item = Function>) -> Self {
		let candidates = functions.into_iter().map(Candidate::new).collect();
		CandidateSet { address, name: name.into(), candidates }
	}

	/// Function name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Contract address.
	pub fn address(&self) -> &Address {
		&self.address
	}

	/// All candidates, in ABI order.
	pub fn candidates(&self) -> &[Candidate] {
		&self.candidates
	}

	/// Picks the single candidate the arguments should be dispatched to.
	pub fn resolve(&self, args: &[Option<Value>]) -> Result<&Candidate, OverloadError> {
		let resolved = self.funnel(args)?;
		debug!(
			contract = %to_checksum(&self.address),
			signature = %resolved.function.signature(),
			selector = %selector_hex(&resolved.selector),
			"resolved overload"
		);
		Ok(resolved)
	}

	fn funnel(&self, args: &[Option<Value>]) -> Result<&Candidate, OverloadError> {
		// arity
		let possible =
			self.candidates.iter().filter(|c| c.function.inputs.len() == args.len()).collect::<Vec<_>>();
		match possible.len() {
			0 => {
				let arities = self.candidates.iter().map(|c| c.function.inputs.len());
				return Err(OverloadError::ArityMismatch {
					address: self.address,
					name: self.name.clone(),
					min: arities.clone().min().unwrap_or(0),
					max: arities.max().unwrap_or(0),
					actual: args.len(),
				});
			}
			1 => return Ok(possible[0]),
			_ => {}
		}

		// categories
		let categories = args.iter().map(|arg| classify(arg.as_ref())).collect::<Vec<_>>();
		if let Some(position) = categories.iter().position(|c| *c == Category::Null) {
			return Err(OverloadError::ArgumentError { address: self.address, name: self.name.clone(), position });
		}
		let possible = possible
			.into_iter()
			.filter(|c| c.shapes.iter().zip(&categories).all(|(shape, category)| shape.accepts(category)))
			.collect::<Vec<_>>();
		match possible.len() {
			0 => return Err(OverloadError::TypeMismatch { address: self.address, name: self.name.clone() }),
			1 => return Ok(possible[0]),
			_ => {}
		}

		// fixed lengths, remembering which candidates matched one
		let possible = possible
			.into_iter()
			.filter_map(|c| {
				let mut prioritized = false;
				for (shape, arg) in c.shapes.iter().zip(args.iter().flatten()) {
					if let Arity::Fixed(len) = shape.arity {
						match length_of(arg) == Some(len) {
							true => prioritized = true,
							false => return None,
						}
					}
				}
				Some((c, prioritized))
			})
			.collect::<Vec<_>>();
		match possible.len() {
			0 => return Err(OverloadError::LengthMismatch { address: self.address, name: self.name.clone() }),
			1 => return Ok(possible[0].0),
			_ => {}
		}

		// priority
		let any_prioritized = possible.iter().any(|(_, prioritized)| *prioritized);
		let possible = possible
			.into_iter()
			.filter(|(_, prioritized)| *prioritized || !any_prioritized)
			.map(|(c, _)| c)
			.collect::<Vec<_>>();
		match possible.as_slice() {
			[single] => Ok(*single),
			_ => Err(OverloadError::AmbiguousOverload { address: self.address, name: self.name.clone() }),
		}
	}
}
