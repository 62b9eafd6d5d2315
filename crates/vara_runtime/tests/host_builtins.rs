//! The embedding surface: builtin installation, print output, heap
//! statistics, method dispatch errors, and source lists.

use vara_runtime::{
    BuiltinProvider, BuiltinRegistry, Env, ErrorKind, Heap, Runtime, ScriptError,
    StdBuiltinProvider, Value,
};

fn construct_ok(rt: &mut Runtime, name: &str, args: &[Value]) -> Value {
    let ctor = rt.global(name).expect("builtin constructor");
    rt.call_function(ctor, args).expect("construction should succeed")
}

fn call_builtin(rt: &mut Runtime, name: &str, args: &[Value]) -> Result<Value, ScriptError> {
    let f = rt.global(name).expect("builtin");
    rt.call_function(f, args)
}

#[test]
fn print_renders_each_argument_on_its_own_line() {
    let mut rt = Runtime::new();
    let buffer = construct_ok(&mut rt, "Buffer", &[Value::from_i64(8)]);
    let view = construct_ok(&mut rt, "Uint8View", &[Value::from_i64(4)]);
    let list = rt.alloc_list(vec![Value::from_i64(1), Value::from_i64(2)]);
    let function = rt.global("gc").unwrap();

    let args = [
        Value::from_i64(42),
        buffer,
        view,
        Value::from_f64(1.5),
        list,
        Value::from_bool(true),
        Value::UNIT,
        function,
    ];
    call_builtin(&mut rt, "print", &args).unwrap();

    let expected = "42\n\
                    Buffer(byte_length=8)\n\
                    Uint8View(length=4)\n\
                    1.5\n\
                    [1,2]\n\
                    true\n\
                    ()\n\
                    function\n";
    assert_eq!(rt.take_output(), expected);

    // Output is drained by the take.
    assert_eq!(rt.take_output(), "");
}

#[test]
fn print_formats_whole_floats_as_integers() {
    let mut rt = Runtime::new();
    call_builtin(&mut rt, "print", &[Value::from_f64(2.0)]).unwrap();
    assert_eq!(rt.take_output(), "2\n");
}

#[test]
fn heap_stats_distinguish_owned_views_from_aliases() {
    let mut rt = Runtime::new();
    let buffer = construct_ok(&mut rt, "Buffer", &[Value::from_i64(8)]);
    let _alias = construct_ok(&mut rt, "Uint16View", &[buffer]);

    call_builtin(&mut rt, "__heap_stats", &[]).unwrap();
    let stats = rt.take_output();
    assert!(stats.contains("=== Heap Memory Stats ==="));
    assert!(stats.contains("[owned=1, aliases=1]"), "{stats}");
}

#[test]
fn registry_lists_the_standard_builtins() {
    let mut registry = BuiltinRegistry::new();
    StdBuiltinProvider.install(&mut registry);

    let names = registry.names();
    for expected in [
        "Buffer",
        "Int8View",
        "Uint8View",
        "Int16View",
        "Uint16View",
        "Int32View",
        "Uint32View",
        "Float32View",
        "Float64View",
        "print",
        "gc",
        "__heap_stats",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }

    let mut env = Env::new();
    let mut heap = Heap::new();
    registry.install_into(&mut env, &mut heap);
    assert_eq!(env.len(), names.len());
    assert!(env.get("print").is_some());
}

#[test]
fn custom_builtins_join_the_global_scope() {
    fn double(_rt: &mut Runtime, args: &[Value]) -> Result<Value, ScriptError> {
        Ok(Value::from_i64(args[0].as_i64() * 2))
    }

    let mut rt = Runtime::new();
    rt.register_builtin("double", double);

    let out = call_builtin(&mut rt, "double", &[Value::from_i64(21)]).unwrap();
    assert_eq!(out.as_i64(), 42);
}

#[test]
fn method_arity_is_validated() {
    let mut rt = Runtime::new();
    let view = construct_ok(&mut rt, "Int8View", &[Value::from_i64(2)]);

    let err = rt.call_method(view, "get", &[]).unwrap_err();
    assert_eq!(err.message, "get expects 1 argument");

    let err = rt.call_method(view, "set", &[Value::from_i64(0)]).unwrap_err();
    assert_eq!(err.message, "set expects 2 arguments");

    let err = rt.call_method(view, "length", &[Value::UNIT]).unwrap_err();
    assert_eq!(err.message, "length expects 0 arguments");
}

#[test]
fn unknown_methods_name_the_receiver() {
    let mut rt = Runtime::new();
    let view = construct_ok(&mut rt, "Int8View", &[Value::from_i64(2)]);
    let list = rt.alloc_list(Vec::new());

    let err = rt.call_method(view, "frobnicate", &[]).unwrap_err();
    assert_eq!(err.message, "Unknown method 'frobnicate' on view");

    let err = rt.call_method(list, "frobnicate", &[]).unwrap_err();
    assert_eq!(err.message, "Unknown method 'frobnicate' on list");

    let err = rt.call_method(Value::from_i64(7), "get", &[]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
    assert_eq!(err.message, "Unsupported method receiver: int");
}

#[test]
fn calling_non_functions_fails() {
    let mut rt = Runtime::new();
    let err = rt.call_function(Value::from_i64(3), &[]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
    assert_eq!(err.message, "Expected function, got int");
}

#[test]
fn lists_expose_length_get_and_push() {
    let mut rt = Runtime::new();
    let list = rt.alloc_list(vec![Value::from_i64(10), Value::from_i64(20)]);

    let len = rt.call_method(list, "length", &[]).unwrap();
    assert_eq!(len.as_i64(), 2);
    let got = rt.call_method(list, "get", &[Value::from_i64(1)]).unwrap();
    assert_eq!(got.as_i64(), 20);

    rt.call_method(list, "push", &[Value::from_i64(30)]).unwrap();
    let len = rt.call_method(list, "length", &[]).unwrap();
    assert_eq!(len.as_i64(), 3);
    let got = rt.call_method(list, "get", &[Value::from_i64(2)]).unwrap();
    assert_eq!(got.as_i64(), 30);

    for bad in [-1, 3] {
        let err = rt
            .call_method(list, "get", &[Value::from_i64(bad)])
            .unwrap_err();
        assert_eq!(err.message, "Index out of bounds");
    }
}
