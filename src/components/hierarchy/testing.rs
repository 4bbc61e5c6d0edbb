use std::collections::HashSet;

use proptest::prelude::*;

use crate::document::{Scalar, Value, parse_json};

pub fn json(text: &str) -> Value {
	parse_json(text).unwrap()
}

/// Arbitrary finite documents, a few levels deep.
pub fn arb_value() -> impl Strategy<Value = Value> {
	let leaf = prop_oneof![
		Just(Value::Scalar(Scalar::Null)),
		any::<bool>().prop_map(|b| Value::Scalar(Scalar::Bool(b))),
		any::<i32>().prop_map(|n| Value::Scalar(Scalar::Number(n.into()))),
		"[a-z ]{0,6}".prop_map(Value::string),
	];
	leaf.prop_recursive(4, 48, 5, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Sequence),
			prop::collection::vec(("[a-z]{1,3}", inner), 0..5).prop_map(|entries| {
				let mut seen = HashSet::new();
				Value::Mapping(
					entries
						.into_iter()
						.filter(|(key, _)| seen.insert(key.clone()))
						.collect(),
				)
			}),
		]
	})
}
