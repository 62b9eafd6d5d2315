use smallvec::SmallVec;

use super::super::Runtime;
use crate::coerce::{self, MAX_VIEW_LENGTH};
use crate::core::heap::ManagedObject;
use crate::core::raw::RawData;
use crate::core::value::{TAG_LIST, TAG_VIEW, Value};
use crate::core::view::{ElementKind, ReclaimState, Storage, ViewInstance};
use crate::errors::messages;
use vara_core::error::ScriptError;

pub fn builtin_buffer(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    construct(rt, args, ElementKind::Uint8, true)
}

pub fn builtin_int8_view(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    construct(rt, args, ElementKind::Int8, false)
}

pub fn builtin_uint8_view(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    construct(rt, args, ElementKind::Uint8, false)
}

pub fn builtin_int16_view(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    construct(rt, args, ElementKind::Int16, false)
}

pub fn builtin_uint16_view(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    construct(rt, args, ElementKind::Uint16, false)
}

pub fn builtin_int32_view(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    construct(rt, args, ElementKind::Int32, false)
}

pub fn builtin_uint32_view(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    construct(rt, args, ElementKind::Uint32, false)
}

pub fn builtin_float32_view(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    construct(rt, args, ElementKind::Float32, false)
}

pub fn builtin_float64_view(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    construct(rt, args, ElementKind::Float64, false)
}

/// Shared constructor behind every view builtin.
///
/// Three argument forms: `(buffer[, byte_offset[, length]])` aliases an
/// existing buffer, `(list)` copies a numeric sequence into fresh storage,
/// and `(length)` allocates zeroed storage.
fn construct(
    rt: &mut Runtime,
    args: &[Value],
    kind: ElementKind,
    as_buffer: bool,
) -> Result<Value, ScriptError> {
    // Arguments are rooted by the caller, so this is a safe point.
    rt.maybe_gc_with_roots(&[]);

    if args.is_empty() {
        return Err(ScriptError::type_error(messages::EXPECTED_SOME_ARGUMENT));
    }
    if is_buffer_value(rt, &args[0]) {
        if args.len() > 3 {
            return Err(ScriptError::type_error(messages::BUFFER_FORM_ARITY));
        }
        return construct_alias(rt, args, kind, as_buffer);
    }
    if args.len() != 1 {
        return Err(ScriptError::type_error(messages::EXPECTED_ONE_ARGUMENT));
    }
    if args[0].get_tag() == TAG_LIST {
        return construct_from_sequence(rt, args[0], kind, as_buffer);
    }
    construct_with_length(rt, &args[0], kind, as_buffer)
}

fn is_buffer_value(rt: &Runtime, v: &Value) -> bool {
    if v.get_tag() != TAG_VIEW || !rt.heap.contains(v.as_obj_id()) {
        return false;
    }
    match rt.heap.get(v.as_obj_id()) {
        ManagedObject::View(view) => view.is_buffer,
        _ => false,
    }
}

/// Resolve a buffer argument to `(owner, base offset, byte length)`.
///
/// A buffer that itself aliases another buffer collapses to the ultimate
/// owner here, so stored parent links are always one hop.
fn resolve_buffer(rt: &Runtime, target: &Value) -> Result<(Value, usize, usize), ScriptError> {
    let view = rt.expect_view(*target)?;
    if !view.is_buffer {
        return Err(ScriptError::type_error(messages::NOT_A_BUFFER));
    }
    match &view.storage {
        Storage::Owned(data) => {
            if view.state != ReclaimState::Live || data.is_released() {
                return Err(ScriptError::type_error(messages::BUFFER_NO_DATA));
            }
            Ok((*target, 0, view.byte_length()))
        }
        Storage::Alias {
            parent,
            byte_offset,
        } => {
            let (owner, base, byte_length) = (*parent, *byte_offset, view.byte_length());
            let owner_view = rt.expect_view(owner)?;
            match &owner_view.storage {
                Storage::Owned(data) => {
                    if owner_view.state != ReclaimState::Live || data.is_released() {
                        return Err(ScriptError::type_error(messages::BUFFER_NO_DATA));
                    }
                }
                Storage::Alias { .. } => unreachable!(),
            }
            Ok((owner, base, byte_length))
        }
    }
}

fn construct_alias(
    rt: &mut Runtime,
    args: &[Value],
    kind: ElementKind,
    as_buffer: bool,
) -> Result<Value, ScriptError> {
    let element_size = kind.size();
    let (owner, base_offset, buffer_byte_length) = resolve_buffer(rt, &args[0])?;

    let byte_offset = if args.len() > 1 {
        coerce::to_length(&args[1])? as usize
    } else {
        0
    };
    if byte_offset % element_size != 0 {
        return Err(ScriptError::range_error(messages::OFFSET_MISALIGNED));
    }
    if byte_offset > buffer_byte_length {
        return Err(ScriptError::range_error(messages::OFFSET_PAST_END));
    }

    let length = if args.len() > 2 {
        coerce::to_length(&args[2])? as usize
    } else {
        let remainder = buffer_byte_length - byte_offset;
        if remainder % element_size != 0 {
            return Err(ScriptError::range_error(messages::SPAN_NOT_MULTIPLE));
        }
        remainder / element_size
    };

    let byte_span = length
        .checked_mul(element_size)
        .ok_or_else(|| ScriptError::range_error(messages::LENGTH_PAST_END))?;
    let end = byte_offset
        .checked_add(byte_span)
        .ok_or_else(|| ScriptError::range_error(messages::LENGTH_PAST_END))?;
    if end > buffer_byte_length {
        return Err(ScriptError::range_error(messages::LENGTH_PAST_END));
    }

    let view = ViewInstance::aliasing(kind, length, owner, base_offset + byte_offset, as_buffer);
    let id = rt.heap.alloc(ManagedObject::View(Box::new(view)));
    Ok(Value::view(id))
}

fn construct_from_sequence(
    rt: &mut Runtime,
    source: Value,
    kind: ElementKind,
    as_buffer: bool,
) -> Result<Value, ScriptError> {
    let items: SmallVec<[Value; 8]> = match rt.heap.get(source.as_obj_id()) {
        ManagedObject::List(items) => SmallVec::from_slice(items),
        _ => return Err(ScriptError::type_error(messages::NOT_A_LIST)),
    };
    if items.len() as i64 > MAX_VIEW_LENGTH {
        return Err(ScriptError::range_error(messages::LENGTH_TOO_LARGE));
    }

    let mut data = allocate_zeroed(items.len(), kind)?;
    let bytes = data.as_mut_slice();
    for (i, item) in items.iter().enumerate() {
        let number = coerce::to_number(item)?;
        kind.write_element(bytes, i, number);
    }

    let view = ViewInstance::owning(kind, items.len(), data, as_buffer);
    let id = rt.heap.alloc(ManagedObject::View(Box::new(view)));
    Ok(Value::view(id))
}

fn construct_with_length(
    rt: &mut Runtime,
    arg: &Value,
    kind: ElementKind,
    as_buffer: bool,
) -> Result<Value, ScriptError> {
    let length = coerce::to_length(arg)? as usize;
    let data = allocate_zeroed(length, kind)?;
    let view = ViewInstance::owning(kind, length, data, as_buffer);
    let id = rt.heap.alloc(ManagedObject::View(Box::new(view)));
    Ok(Value::view(id))
}

fn allocate_zeroed(length: usize, kind: ElementKind) -> Result<RawData, ScriptError> {
    let byte_length = length
        .checked_mul(kind.size())
        .ok_or_else(|| ScriptError::range_error(messages::LENGTH_TOO_LARGE))?;
    RawData::zeroed(byte_length)
        .ok_or_else(|| ScriptError::out_of_memory(messages::ALLOCATION_FAILED))
}
