use serde_json::{Map, Value};

use crate::logs::errors::MergeConflict;

/// Merges `metadata` into `record`.
///
/// Keys missing from `record` are added, nested maps are merged recursively and
/// keys holding the same value on both sides are left alone. Any other overlap
/// is a conflict, reported with the dotted path of the offending key.
pub fn merge(
    mut record: Map<String, Value>,
    metadata: &Map<String, Value>,
) -> Result<Map<String, Value>, MergeConflict> {
    let mut path = Vec::new();
    merge_into(&mut record, metadata, &mut path)?;
    Ok(record)
}

fn merge_into<'a>(
    target: &mut Map<String, Value>,
    source: &'a Map<String, Value>,
    path: &mut Vec<&'a str>,
) -> Result<(), MergeConflict> {
    for (key, value) in source {
        if let Some(existing) = target.get_mut(key) {
            match (existing, value) {
                (Value::Object(existing), Value::Object(nested)) => {
                    path.push(key);
                    merge_into(existing, nested, path)?;
                    path.pop();
                }
                (existing, value) if *existing == *value => {}
                _ => {
                    path.push(key);
                    return Err(MergeConflict {
                        path: path.join("."),
                    });
                }
            }
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(())
}
