use super::MethodKind;
use super::common::{expect_list, expect_list_mut, unknown_method, validate_arity};
use crate::Runtime;
use crate::Value;
use crate::errors::messages::INDEX_OUT_OF_BOUNDS;
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
            let list = expect_list(rt, recv)?;
            if index < 0 || index >= list.len() as i64 {
                return Err(ScriptError::range_error(INDEX_OUT_OF_BOUNDS));
            }
            Ok(list[index as usize])
        }
        MethodKind::Len => {
            validate_arity(method, args.len(), 0, 0)?;
            Ok(Value::from_i64(expect_list(rt, recv)?.len() as i64))
        }
        MethodKind::ListPush => {
            validate_arity(method, args.len(), 1, 1)?;
            let item = args[0];
            expect_list_mut(rt, recv)?.push(item);
            Ok(Value::UNIT)
        }
        _ => Err(unknown_method(method, recv.type_name())),
    }
}
