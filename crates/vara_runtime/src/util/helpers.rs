use std::collections::HashSet;

use crate::Value;
use crate::core::heap::{Heap, ManagedObject};
use vara_core::error::ScriptError;

pub(crate) fn value_to_string(v: &Value, heap: &Heap) -> String {
    let mut visited = HashSet::new();
    value_to_string_impl(v, heap, &mut visited)
}

fn value_to_string_impl(v: &Value, heap: &Heap, visited: &mut HashSet<usize>) -> String {
    if v.is_unit() {
        "()".to_string()
    } else if v.is_bool() {
        if v.as_bool() {
            "true".to_string()
        } else {
            "false".to_string()
        }
    } else if v.is_int() {
        let mut buf = itoa::Buffer::new();
        buf.format(v.as_i64()).to_string()
    } else if v.is_f64() {
        let f = v.as_f64();
        if f.is_finite() && f.fract() == 0.0 {
            let mut buf = itoa::Buffer::new();
            buf.format(f as i64).to_string()
        } else {
            let mut buf = ryu::Buffer::new();
            buf.format(f).to_string()
        }
    } else {
        let tag = v.get_tag();
        let id = v.as_obj_id();
        match tag {
            crate::core::value::TAG_LIST => {
                if visited.contains(&id.0) {
                    return "[...]".to_string();
                }
                visited.insert(id.0);
                if let ManagedObject::List(items) = heap.get(id) {
                    let strs: Vec<_> = items
                        .iter()
                        .map(|item| value_to_string_impl(item, heap, visited))
                        .collect();
                    format!("[{}]", strs.join(","))
                } else {
                    "[]".into()
                }
            }
            crate::core::value::TAG_VIEW => {
                if let ManagedObject::View(view) = heap.get(id) {
                    if view.is_buffer {
                        format!("Buffer(byte_length={})", view.byte_length())
                    } else {
                        format!("{}(length={})", view.kind.type_name(), view.length)
                    }
                } else {
                    "view".to_string()
                }
            }
            crate::core::value::TAG_FUNC => "function".to_string(),
            _ => "unknown".to_string(),
        }
    }
}

pub(crate) fn to_i64(v: &Value) -> Result<i64, ScriptError> {
    if v.is_int() {
        Ok(v.as_i64())
    } else if v.is_f64() {
        Ok(v.as_f64() as i64)
    } else {
        Err(ScriptError::type_error(format!(
            "Expected number, got {}",
            v.type_name()
        )))
    }
}
