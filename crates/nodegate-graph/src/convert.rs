//! JSON attribute values to Bolt parameters.

use neo4rs::{BoltList, BoltMap, BoltNull, BoltString, BoltType};
use serde_json::Value;

use nodegate_core::Attributes;

/// Convert a JSON value to its Bolt equivalent.
///
/// Integers that fit in `i64` stay integers, everything else numeric
/// becomes a float.
pub fn to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::from(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BoltType::from(i),
            None => BoltType::from(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => BoltType::from(s.clone()),
        Value::Array(items) => {
            let mut list = BoltList::new();
            for item in items {
                list.push(to_bolt(item));
            }
            BoltType::List(list)
        }
        Value::Object(map) => attributes_to_bolt(map),
    }
}

/// Convert an attribute mapping to a Bolt map parameter.
pub fn attributes_to_bolt(attributes: &Attributes) -> BoltType {
    let mut map = BoltMap::new();
    for (key, value) in attributes {
        map.put(BoltString::from(key.as_str()), to_bolt(value));
    }
    BoltType::Map(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_keep_their_type() {
        assert!(matches!(to_bolt(&json!(1)), BoltType::Integer(_)));
        assert!(matches!(to_bolt(&json!(-40)), BoltType::Integer(_)));
        assert!(matches!(to_bolt(&json!(1.5)), BoltType::Float(_)));
        assert!(matches!(to_bolt(&json!(u64::MAX)), BoltType::Float(_)));
        assert!(matches!(to_bolt(&json!(true)), BoltType::Boolean(_)));
        assert!(matches!(to_bolt(&json!("x")), BoltType::String(_)));
        assert!(matches!(to_bolt(&json!(null)), BoltType::Null(_)));
    }

    #[test]
    fn arrays_become_lists() {
        match to_bolt(&json!(["a", "b", "c"])) {
            BoltType::List(list) => assert_eq!(list.len(), 3),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn attribute_map_keeps_every_key() {
        let attrs = json!({"name": "Test User", "sex": 1})
            .as_object()
            .cloned()
            .unwrap();
        match attributes_to_bolt(&attrs) {
            BoltType::Map(map) => {
                assert_eq!(map.value.len(), 2);
                assert!(map.value.contains_key(&BoltString::from("name")));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn empty_attributes_make_empty_map() {
        match attributes_to_bolt(&Attributes::new()) {
            BoltType::Map(map) => assert!(map.value.is_empty()),
            other => panic!("expected map, got {other:?}"),
        }
    }
}
