use crate::Runtime;
use crate::Value;
use crate::core::heap::ManagedObject;
use crate::errors::messages::NOT_A_LIST;
use vara_core::error::ScriptError;

/// Check that a method call carries an argument count within bounds.
pub fn validate_arity(
    method: &str,
    args_len: usize,
    min: usize,
    max: usize,
) -> Result<(), ScriptError> {
    if args_len < min || args_len > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        };
        return Err(ScriptError::type_error(format!(
            "{} expects {} argument{}",
            method,
            expected,
            if max == 1 { "" } else { "s" }
        )));
    }
    Ok(())
}

pub fn unknown_method(method: &str, receiver: &str) -> ScriptError {
    ScriptError::type_error(format!("Unknown method '{}' on {}", method, receiver))
}

pub fn expect_list(rt: &Runtime, value: Value) -> Result<&Vec<Value>, ScriptError> {
    let id = value.as_obj_id();
    let obj = rt.heap.get(id);
    if let ManagedObject::List(list) = obj {
        Ok(list)
    } else {
        Err(ScriptError::type_error(NOT_A_LIST))
    }
}

pub fn expect_list_mut(rt: &mut Runtime, value: Value) -> Result<&mut Vec<Value>, ScriptError> {
    // Check the type through a shared borrow first.
    {
        let id = value.as_obj_id();
        let obj = rt.heap.get(id);
        if !matches!(obj, ManagedObject::List(_)) {
            return Err(ScriptError::type_error(NOT_A_LIST));
        }
    }

    let id = value.as_obj_id();
    let obj = rt.heap.get_mut(id);
    match obj {
        ManagedObject::List(list) => Ok(list),
        _ => unreachable!(),
    }
}
