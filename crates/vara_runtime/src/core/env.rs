use super::Value;
use super::value::{FastHashMap, fast_map_new};

/// Global bindings visible to scripts. Hosts install builtins here and may
/// add their own globals before running script code.
#[derive(Clone, Debug)]
pub struct Env {
    globals: FastHashMap<String, Value>,
}

impl Env {
    pub fn new() -> Self {
        Self {
            globals: fast_map_new(),
        }
    }

    /// Bind `name` globally, replacing any previous binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.globals.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.globals.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
    }

    /// All bound values, in no particular order. The collector treats these
    /// as roots.
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.globals.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_replaces_previous_binding() {
        let mut env = Env::new();
        assert!(env.is_empty());
        env.define("x", Value::from_i64(1));
        env.define("x", Value::from_i64(2));
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("x").unwrap().as_i64(), 2);
        assert!(env.get("y").is_none());
    }
}
