use crate::Value;

use crate::Runtime;
use vara_core::error::ScriptError;

mod common;
mod list;
mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodKind {
    Get,
    Set,
    Len,
    ByteLen,
    BytesPerElement,
    ListPush,
    Unknown,
}

impl Default for MethodKind {
    fn default() -> Self {
        Self::Unknown
    }
}

impl MethodKind {
    pub(crate) fn from_str(s: &str) -> Self {
        match s {
            "get" => Self::Get,
            "set" => Self::Set,
            "length" => Self::Len,
            "byte_length" => Self::ByteLen,
            "BYTES_PER_ELEMENT" => Self::BytesPerElement,
            "push" => Self::ListPush,
            _ => Self::Unknown,
        }
    }
}

pub(super) fn dispatch_builtin_method(
    rt: &mut Runtime,
    recv: Value,
    kind: MethodKind,
    args: &[Value],
    method: &str,
) -> Result<Value, ScriptError> {
    match recv.get_tag() {
        crate::core::value::TAG_VIEW => view::dispatch(rt, recv, kind, args, method),
        crate::core::value::TAG_LIST => list::dispatch(rt, recv, kind, args, method),
        _ => Err(ScriptError::type_error(format!(
            "Unsupported method receiver: {}",
            recv.type_name()
        ))),
    }
}
