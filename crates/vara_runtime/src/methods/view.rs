use super::MethodKind;
use super::common::{unknown_method, validate_arity};
use crate::Runtime;
use crate::Value;
use crate::util::to_i64;
use vara_core::error::ScriptError;

pub(super) fn dispatch(
    rt: &mut Runtime,
    recv: Value,
    kind: MethodKind,
    args: &[Value],
    method: &str,
) -> Result<Value, ScriptError> {
    match kind {
        MethodKind::Get => {
            validate_arity(method, args.len(), 1, 1)?;
            let index = to_i64(&args[0])?;
            rt.view_get(recv, index)
        }
        MethodKind::Set => {
            validate_arity(method, args.len(), 2, 2)?;
            let index = to_i64(&args[0])?;
            rt.view_set(recv, index, args[1])?;
            Ok(Value::UNIT)
        }
        MethodKind::Len => {
            validate_arity(method, args.len(), 0, 0)?;
            Ok(Value::from_i64(rt.view_length(recv)? as i64))
        }
        MethodKind::ByteLen => {
            validate_arity(method, args.len(), 0, 0)?;
            Ok(Value::from_i64(rt.view_byte_length(recv)? as i64))
        }
        MethodKind::BytesPerElement => {
            validate_arity(method, args.len(), 0, 0)?;
            Ok(Value::from_i64(rt.view_element_size(recv)? as i64))
        }
        _ => Err(unknown_method(method, recv.type_name())),
    }
}
