use crate::builtins_registry;
use crate::coerce;
use crate::core::Env;
use crate::core::Value;
use crate::core::heap::{Heap, ManagedObject};
use crate::core::value::{TAG_FUNC, TAG_VIEW};
use crate::core::view::{Storage, ViewInstance};
use crate::errors::messages;
use crate::methods;
use vara_core::error::ScriptError;

// Import types from sibling modules
use super::config::RuntimeConfig;

use crate::methods::MethodKind;

pub struct Runtime {
    pub(crate) env: Env,
    pub(crate) heap: Heap,
    pub(crate) output: String,
    pub(crate) config: RuntimeConfig,
    /// Temporary GC roots for values being evaluated (e.g., call arguments)
    pub(crate) gc_temp_roots: Vec<Value>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let mut rt = Self {
            env: Env::new(),
            heap: Heap::new(),
            output: String::new(),
            config,
            gc_temp_roots: Vec::new(),
        };
        rt.install_builtins();
        rt
    }

    pub(crate) fn install_builtins(&mut self) {
        let mut registry = builtins_registry::BuiltinRegistry::new();
        builtins_registry::BuiltinProvider::install(
            &builtins_registry::StdBuiltinProvider,
            &mut registry,
        );
        registry.install_into(&mut self.env, &mut self.heap);
    }

    /// Register an additional host function as a global.
    pub fn register_builtin(&mut self, name: &str, fun: builtins_registry::BuiltinFn) {
        let id = self.heap.alloc(ManagedObject::Function(fun));
        self.env.define(name, Value::function(id));
    }

    /// Look up a global binding.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.env.get(name)
    }

    /// Bind a global visible to scripts. The value becomes a GC root.
    pub fn define_global(&mut self, name: &str, value: Value) {
        self.env.define(name, value);
    }

    /// Invoke a callable value. The callee and arguments stay rooted for
    /// the duration of the call.
    pub fn call_function(&mut self, f: Value, args: &[Value]) -> Result<Value, ScriptError> {
        if f.get_tag() != TAG_FUNC {
            return Err(ScriptError::type_error(format!(
                "Expected function, got {}",
                f.type_name()
            )));
        }
        let fun = match self.heap.get(f.as_obj_id()) {
            ManagedObject::Function(fun) => *fun,
            _ => {
                return Err(ScriptError::type_error(format!(
                    "Expected function, got {}",
                    f.type_name()
                )));
            }
        };

        let base = self.gc_temp_roots.len();
        self.gc_temp_roots.push(f);
        self.gc_temp_roots.extend_from_slice(args);
        let result = fun(self, args);
        self.gc_temp_roots.truncate(base);
        result
    }

    /// Invoke a named method on a receiver value. The receiver and
    /// arguments stay rooted for the duration of the call.
    pub fn call_method(
        &mut self,
        recv: Value,
        method: &str,
        args: &[Value],
    ) -> Result<Value, ScriptError> {
        let kind = MethodKind::from_str(method);
        let base = self.gc_temp_roots.len();
        self.gc_temp_roots.push(recv);
        self.gc_temp_roots.extend_from_slice(args);
        let result = methods::dispatch_builtin_method(self, recv, kind, args, method);
        self.gc_temp_roots.truncate(base);
        result
    }

    /// Allocate a script list from host values. The items are rooted
    /// across any collection this triggers.
    pub fn alloc_list(&mut self, items: Vec<Value>) -> Value {
        self.maybe_gc_with_roots(&items);
        Value::list(self.heap.alloc(ManagedObject::List(items)))
    }

    pub(crate) fn expect_view(&self, value: Value) -> Result<&ViewInstance, ScriptError> {
        if value.get_tag() != TAG_VIEW {
            return Err(ScriptError::type_error(messages::NOT_A_VIEW));
        }
        match self.heap.get(value.as_obj_id()) {
            ManagedObject::View(view) => Ok(view),
            _ => Err(ScriptError::type_error(messages::NOT_A_VIEW)),
        }
    }

    pub(crate) fn expect_view_mut(
        &mut self,
        value: Value,
    ) -> Result<&mut ViewInstance, ScriptError> {
        // Check the type through a shared borrow first.
        {
            if value.get_tag() != TAG_VIEW {
                return Err(ScriptError::type_error(messages::NOT_A_VIEW));
            }
            let obj = self.heap.get(value.as_obj_id());
            if !matches!(obj, ManagedObject::View(_)) {
                return Err(ScriptError::type_error(messages::NOT_A_VIEW));
            }
        }

        match self.heap.get_mut(value.as_obj_id()) {
            ManagedObject::View(view) => Ok(view),
            _ => unreachable!(),
        }
    }

    /// Read element `index` of a view.
    pub fn view_get(&self, view: Value, index: i64) -> Result<Value, ScriptError> {
        let instance = self.expect_view(view)?;
        if index < 0 || index >= instance.length as i64 {
            return Err(ScriptError::range_error(messages::INDEX_OUT_OF_BOUNDS));
        }
        let i = index as usize;
        match &instance.storage {
            Storage::Owned(data) => Ok(instance.kind.read_element(data.as_slice(), i)),
            Storage::Alias {
                parent,
                byte_offset,
            } => {
                let (kind, parent, offset) = (instance.kind, *parent, *byte_offset);
                let owner = self.expect_view(parent)?;
                match &owner.storage {
                    Storage::Owned(data) => Ok(kind.read_element(&data.as_slice()[offset..], i)),
                    Storage::Alias { .. } => unreachable!(),
                }
            }
        }
    }

    /// Write `value` at `index`, coercing it to the view's element type.
    pub fn view_set(&mut self, view: Value, index: i64, value: Value) -> Result<(), ScriptError> {
        let number = coerce::to_number(&value)?;
        let (kind, length, target) = {
            let instance = self.expect_view(view)?;
            let target = match &instance.storage {
                Storage::Owned(_) => None,
                Storage::Alias {
                    parent,
                    byte_offset,
                } => Some((*parent, *byte_offset)),
            };
            (instance.kind, instance.length, target)
        };
        if index < 0 || index >= length as i64 {
            return Err(ScriptError::range_error(messages::INDEX_OUT_OF_BOUNDS));
        }
        let i = index as usize;
        match target {
            None => {
                let instance = self.expect_view_mut(view)?;
                match &mut instance.storage {
                    Storage::Owned(data) => kind.write_element(data.as_mut_slice(), i, number),
                    Storage::Alias { .. } => unreachable!(),
                }
            }
            Some((parent, offset)) => {
                let owner = self.expect_view_mut(parent)?;
                match &mut owner.storage {
                    Storage::Owned(data) => {
                        kind.write_element(&mut data.as_mut_slice()[offset..], i, number)
                    }
                    Storage::Alias { .. } => unreachable!(),
                }
            }
        }
        Ok(())
    }

    pub fn view_length(&self, view: Value) -> Result<usize, ScriptError> {
        Ok(self.expect_view(view)?.length)
    }

    pub fn view_byte_length(&self, view: Value) -> Result<usize, ScriptError> {
        Ok(self.expect_view(view)?.byte_length())
    }

    pub fn view_element_size(&self, view: Value) -> Result<usize, ScriptError> {
        Ok(self.expect_view(view)?.kind.size())
    }

    /// True when `v` is a heap reference whose object has not been
    /// collected.
    pub fn is_live(&self, v: Value) -> bool {
        v.is_obj() && self.heap.contains(v.as_obj_id())
    }

    pub fn heap_stats(&self) -> String {
        self.heap.memory_stats()
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn write_output(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }
}
