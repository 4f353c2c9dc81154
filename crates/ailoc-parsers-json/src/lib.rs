use std::path::Path;

use ailoc_core::{AilocError, FlatMap, Result, SectionMap};
use serde_json::{Map, Value};

/// Read a locale artifact. The root must be a JSON object; arrays and
/// scalars at the root are rejected up front.
pub fn read_tree(path: &Path) -> Result<Map<String, Value>> {
    if !path.is_file() {
        return Err(AilocError::InputNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AilocError::InvalidInputShape {
            path: path.to_path_buf(),
        }
        .into()),
    }
}

/// Depth-first flatten. Nested objects extend the dotted prefix; string
/// leaves are recorded as-is; numbers, booleans and null are coerced to
/// their JSON text form (documented limitation). Arrays abort the run.
pub fn flatten(tree: &Map<String, Value>) -> Result<FlatMap> {
    let mut out = FlatMap::new();
    flatten_into(tree, "", &mut out)?;
    Ok(out)
}

fn flatten_into(tree: &Map<String, Value>, prefix: &str, out: &mut FlatMap) -> Result<()> {
    for (key, value) in tree {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(inner, &full, out)?,
            Value::Array(_) => {
                return Err(AilocError::UnsupportedArray { key: full }.into());
            }
            Value::String(s) => {
                out.insert(full, s.clone());
            }
            other => {
                out.insert(full, other.to_string());
            }
        }
    }
    Ok(())
}

/// Rebuild a nested tree from dotted keys. Conflicting structure (a key
/// terminating where another key descends) is an error, never a silent
/// overwrite.
pub fn unflatten(flat: &FlatMap) -> Result<Map<String, Value>> {
    let mut root = Map::new();
    for (key, value) in flat {
        let segments: Vec<&str> = key.split('.').collect();
        let (last, parents) = segments.split_last().expect("split never yields empty");

        let mut cursor = &mut root;
        for seg in parents {
            let entry = cursor
                .entry(seg.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            cursor = match entry {
                Value::Object(map) => map,
                _ => {
                    return Err(AilocError::StructuralConflict { key: key.clone() }.into());
                }
            };
        }
        match cursor.get(*last) {
            Some(Value::Object(_)) => {
                return Err(AilocError::StructuralConflict { key: key.clone() }.into());
            }
            _ => {
                cursor.insert(last.to_string(), Value::String(value.clone()));
            }
        }
    }
    Ok(root)
}

/// Partition a flat mapping by the first path segment. A dotless key maps
/// to an empty remainder and round-trips back to the bare section name.
pub fn group_sections(flat: &FlatMap) -> SectionMap {
    let mut out = SectionMap::new();
    for (key, value) in flat {
        let (section, remainder) = match key.split_once('.') {
            Some((s, r)) => (s, r),
            None => (key.as_str(), ""),
        };
        out.entry(section.to_string())
            .or_default()
            .insert(remainder.to_string(), value.clone());
    }
    out
}

/// Exact inverse of `group_sections`.
pub fn ungroup_sections(sections: &SectionMap) -> FlatMap {
    let mut out = FlatMap::new();
    for (section, strings) in sections {
        for (remainder, value) in strings {
            let key = if remainder.is_empty() {
                section.clone()
            } else {
                format!("{section}.{remainder}")
            };
            out.insert(key, value.clone());
        }
    }
    out
}

/// Stable artifact rendering: 2-space indentation plus a trailing newline,
/// key order as inserted. Byte-exact output keeps locale files diff-friendly
/// and lets incremental mode compare files without re-parsing.
pub fn render_tree_bytes(tree: &Map<String, Value>) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(&Value::Object(tree.clone()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn write_tree(path: &Path, tree: &Map<String, Value>) -> Result<()> {
    let bytes = render_tree_bytes(tree)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| AilocError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, bytes).map_err(|source| AilocError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
