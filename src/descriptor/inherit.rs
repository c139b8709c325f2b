use serde_json::{Map, Value};

use crate::descriptor::value::Descriptor;

/// Merge prototype `base` into `object`; fields specified by `object` win.
///
/// When both sides hold lists of records (typically `elements`), the lists merge: prototype
/// items keep their order, an item whose `id` matches a prototype item is merged into it
/// recursively, everything else is appended.
pub fn inherit_properties(object: &Descriptor, base: Option<&Descriptor>) -> Descriptor {
    match base {
        Some(base) => Descriptor::from(merge_records(object.as_map(), base.as_map())),
        None => object.clone(),
    }
}

fn merge_records(object: &Map<String, Value>, base: &Map<String, Value>) -> Map<String, Value> {
    let mut out = object.clone();
    for (key, base_value) in base {
        match out.get(key) {
            None => {
                out.insert(key.clone(), base_value.clone());
            }
            Some(Value::Array(items)) => {
                if let Value::Array(base_items) = base_value
                    && all_records(items)
                    && all_records(base_items)
                {
                    let merged = merge_lists(items, base_items);
                    out.insert(key.clone(), Value::Array(merged));
                }
            }
            Some(_) => {}
        }
    }
    out
}

fn all_records(items: &[Value]) -> bool {
    items.iter().all(Value::is_object)
}

fn merge_lists(items: &[Value], base_items: &[Value]) -> Vec<Value> {
    let mut merged = base_items.to_vec();
    for item in items {
        let Some(record) = item.as_object() else {
            continue;
        };
        let slot = record.get("id").and_then(Value::as_str).and_then(|id| {
            merged
                .iter()
                .position(|m| m.get("id").and_then(Value::as_str) == Some(id))
        });
        match slot {
            Some(idx) => {
                let base_record = merged[idx].as_object().cloned().unwrap_or_default();
                merged[idx] = Value::Object(merge_records(record, &base_record));
            }
            None => merged.push(item.clone()),
        }
    }
    merged
}

#[cfg(test)]
#[path = "../../tests/unit/descriptor/inherit.rs"]
mod tests;
