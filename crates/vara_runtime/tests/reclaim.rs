//! Collection behavior: which handles keep objects alive, when unrooted
//! storage is reclaimed, and how the automatic safe points interact with
//! the embedder-facing configuration.

use vara_runtime::{Runtime, RuntimeConfig, Value};

fn construct_ok(rt: &mut Runtime, name: &str, args: &[Value]) -> Value {
    let ctor = rt.global(name).expect("builtin constructor");
    rt.call_function(ctor, args).expect("construction should succeed")
}

fn get_i64(rt: &mut Runtime, view: Value, index: i64) -> i64 {
    rt.call_method(view, "get", &[Value::from_i64(index)])
        .expect("get")
        .as_i64()
}

fn set_i64(rt: &mut Runtime, view: Value, index: i64, value: i64) {
    rt.call_method(view, "set", &[Value::from_i64(index), Value::from_i64(value)])
        .expect("set");
}

#[test]
fn unrooted_views_are_reclaimed() {
    let mut rt = Runtime::new();
    let view = construct_ok(&mut rt, "Uint8View", &[Value::from_i64(16)]);
    assert!(rt.is_live(view));

    rt.gc(&[]);
    assert!(!rt.is_live(view));

    // A second pass over the emptied heap is a no-op.
    rt.gc(&[]);
}

#[test]
fn rooted_views_survive_collection() {
    let mut rt = Runtime::new();
    let view = construct_ok(&mut rt, "Int32View", &[Value::from_i64(2)]);
    set_i64(&mut rt, view, 1, 41);

    rt.gc(&[view]);
    assert!(rt.is_live(view));
    assert_eq!(get_i64(&mut rt, view, 1), 41);
}

#[test]
fn globals_are_roots() {
    let mut rt = Runtime::new();
    let view = construct_ok(&mut rt, "Int32View", &[Value::from_i64(2)]);
    rt.define_global("buf", view);

    rt.gc(&[]);
    assert!(rt.is_live(view));
    assert_eq!(get_i64(&mut rt, view, 0), 0);
}

#[test]
fn primitives_are_never_heap_handles() {
    let rt = Runtime::new();
    assert!(!rt.is_live(Value::from_i64(3)));
    assert!(!rt.is_live(Value::from_f64(3.5)));
    assert!(!rt.is_live(Value::UNIT));
}

#[test]
fn aliases_keep_the_owning_buffer_alive() {
    let mut rt = Runtime::new();
    let buffer = construct_ok(&mut rt, "Buffer", &[Value::from_i64(8)]);
    set_i64(&mut rt, buffer, 6, 200);
    let window = construct_ok(&mut rt, "Uint8View", &[buffer, Value::from_i64(4)]);

    rt.gc(&[window]);
    assert!(rt.is_live(window));
    assert!(rt.is_live(buffer));
    assert_eq!(get_i64(&mut rt, window, 2), 200);

    rt.gc(&[]);
    assert!(!rt.is_live(window));
    assert!(!rt.is_live(buffer));
}

#[test]
fn list_elements_are_traced() {
    let mut rt = Runtime::new();
    let view = construct_ok(&mut rt, "Float64View", &[Value::from_i64(1)]);
    let list = rt.alloc_list(vec![view]);

    rt.gc(&[list]);
    assert!(rt.is_live(list));
    assert!(rt.is_live(view));
}

#[test]
fn script_gc_builtin_collects_unreferenced_views() {
    let mut rt = Runtime::new();
    let view = construct_ok(&mut rt, "Uint16View", &[Value::from_i64(8)]);
    let keep = construct_ok(&mut rt, "Uint16View", &[Value::from_i64(8)]);
    rt.define_global("keep", keep);

    let gc_fn = rt.global("gc").expect("gc builtin");
    let out = rt.call_function(gc_fn, &[]).unwrap();
    assert!(out.is_unit());

    assert!(!rt.is_live(view));
    assert!(rt.is_live(keep));
}

#[test]
fn heap_slots_are_reusable_after_collection() {
    let mut rt = Runtime::new();
    for _ in 0..50 {
        construct_ok(&mut rt, "Int8View", &[Value::from_i64(64)]);
    }
    rt.gc(&[]);

    let view = construct_ok(&mut rt, "Int8View", &[Value::from_i64(64)]);
    set_i64(&mut rt, view, 63, -5);
    assert_eq!(get_i64(&mut rt, view, 63), -5);
}

#[test]
fn constructor_safe_points_collect_garbage_buffers() {
    let mut rt = Runtime::new();
    let size = Value::from_i64(12 << 20);

    let first = construct_ok(&mut rt, "Buffer", &[size]);
    construct_ok(&mut rt, "Buffer", &[size]);
    construct_ok(&mut rt, "Buffer", &[size]);
    let last = construct_ok(&mut rt, "Buffer", &[size]);

    // Enough bytes accumulated that a later construction collected the
    // earlier, unreachable buffers.
    assert!(!rt.is_live(first));
    assert!(rt.is_live(last));
}

#[test]
fn automatic_collection_can_be_disabled() {
    let config = RuntimeConfig { auto_gc: false };
    let mut rt = Runtime::with_config(config);
    let size = Value::from_i64(12 << 20);

    let mut buffers = Vec::new();
    for _ in 0..4 {
        buffers.push(construct_ok(&mut rt, "Buffer", &[size]));
    }
    for buffer in &buffers {
        assert!(rt.is_live(*buffer));
    }

    // Explicit collection still works with the automatic pass disabled.
    rt.gc(&[]);
    for buffer in &buffers {
        assert!(!rt.is_live(*buffer));
    }
}
