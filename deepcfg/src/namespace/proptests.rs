//! Property-based tests for namespaces.

use super::{Namespace, Value};
use proptest::prelude::*;

// Strategy for generating scalar leaves
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        "[a-z]{0,12}".prop_map(Value::Str),
    ]
}

// Strategy for generating nested values, up to three levels deep
fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                .prop_map(|pairs| Value::Map(pairs.into_iter().collect())),
        ]
    })
}

// Strategy for generating namespaces with unique keys
fn namespace_strategy() -> impl Strategy<Value = Namespace> {
    prop::collection::vec(("[a-z]{1,6}", value_strategy()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Mutating a copy never affects the original
    #[test]
    fn copy_is_isolated(space in namespace_strategy(), key in "[a-z]{1,6}", value in scalar_strategy()) {
        let original = space.clone();
        let mut copy = space.copy();
        prop_assert_eq!(&copy, &original);

        copy.set(&[key.as_str()], value).unwrap();
        prop_assert_eq!(space, original);
    }

    // add never overwrites an existing key
    #[test]
    fn add_is_first_write_wins(existing in namespace_strategy(), incoming in namespace_strategy()) {
        let mut merged = existing.clone();
        merged.add(incoming.clone(), &[] as &[&str]).unwrap();

        for (key, value) in existing.items() {
            prop_assert_eq!(merged.get_key(key), Some(value));
        }
        for (key, value) in incoming.items() {
            if !existing.contains_key(key) {
                prop_assert_eq!(merged.get_key(key), Some(value));
            }
        }
    }

    // Insertion order is preserved and new keys are appended
    #[test]
    fn insertion_order_preserved(keys in prop::collection::vec("[a-z]{1,6}", 0..10)) {
        let mut space = Namespace::new();
        let mut expected: Vec<String> = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            space.insert(key.as_str(), i64::try_from(i).unwrap());
            if !expected.contains(key) {
                expected.push(key.clone());
            }
        }
        prop_assert_eq!(space.keys().map(str::to_string).collect::<Vec<_>>(), expected);
    }

    // check agrees with get for every top-level key
    #[test]
    fn check_matches_get(space in namespace_strategy(), key in "[a-z]{1,6}") {
        prop_assert_eq!(space.check(&key, &[] as &[&str]), space.get(&[key.as_str()]).is_ok());
    }
}
