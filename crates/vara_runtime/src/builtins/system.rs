use super::super::Runtime;
use super::super::util::value_to_string;
use crate::Value;
use vara_core::error::ScriptError;

pub fn builtin_print(rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
    for a in args {
        rt.write_output(&value_to_string(a, &rt.heap));
    }
    Ok(Value::UNIT)
}

pub fn builtin_gc(rt: &mut Runtime, _args: &[Value]) -> Result<Value, ScriptError> {
    rt.gc(&[]);
    // Try to release memory back to OS
    #[cfg(target_os = "linux")]
    unsafe {
        libc::malloc_trim(0);
    }
    Ok(Value::UNIT)
}

pub fn builtin_heap_stats(rt: &mut Runtime, _args: &[Value]) -> Result<Value, ScriptError> {
    let stats = rt.heap.memory_stats();
    rt.write_output(&stats);
    Ok(Value::UNIT)
}
