use crate::Value;

use super::Runtime;
use super::builtins;
use crate::core::env::Env;
use crate::core::heap::{Heap, ManagedObject};
use vara_core::error::ScriptError;

pub type BuiltinFn = fn(&mut Runtime, &[Value]) -> Result<Value, ScriptError>;

pub struct BuiltinRegistry {
    entries: Vec<(String, BuiltinFn)>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, name: &str, fun: BuiltinFn) {
        self.entries.push((name.to_string(), fun));
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn install_into(self, env: &mut Env, heap: &mut Heap) {
        for (name, fun) in self.entries {
            let id = heap.alloc(ManagedObject::Function(fun));
            env.define(&name, Value::function(id));
        }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub trait BuiltinProvider {
    fn install(&self, registry: &mut BuiltinRegistry);
}

pub struct StdBuiltinProvider;

impl BuiltinProvider for StdBuiltinProvider {
    fn install(&self, registry: &mut BuiltinRegistry) {
        // view constructors
        registry.register("Buffer", builtins::builtin_buffer);
        registry.register("Int8View", builtins::builtin_int8_view);
        registry.register("Uint8View", builtins::builtin_uint8_view);
        registry.register("Int16View", builtins::builtin_int16_view);
        registry.register("Uint16View", builtins::builtin_uint16_view);
        registry.register("Int32View", builtins::builtin_int32_view);
        registry.register("Uint32View", builtins::builtin_uint32_view);
        registry.register("Float32View", builtins::builtin_float32_view);
        registry.register("Float64View", builtins::builtin_float64_view);
        // system helpers
        registry.register("print", builtins::builtin_print);
        registry.register("gc", builtins::builtin_gc);
        registry.register("__heap_stats", builtins::builtin_heap_stats);
    }
}
