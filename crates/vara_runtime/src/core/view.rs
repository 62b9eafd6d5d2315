//! Typed numeric views and buffers over raw byte storage.

use super::raw::RawData;
use crate::core::value::Value;

/// Element type of a typed view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl ElementKind {
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Int8,
        ElementKind::Uint8,
        ElementKind::Int16,
        ElementKind::Uint16,
        ElementKind::Int32,
        ElementKind::Uint32,
        ElementKind::Float32,
        ElementKind::Float64,
    ];

    /// Element width in bytes.
    pub fn size(&self) -> usize {
        match self {
            ElementKind::Int8 | ElementKind::Uint8 => 1,
            ElementKind::Int16 | ElementKind::Uint16 => 2,
            ElementKind::Int32 | ElementKind::Uint32 | ElementKind::Float32 => 4,
            ElementKind::Float64 => 8,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Int8 => "Int8View",
            ElementKind::Uint8 => "Uint8View",
            ElementKind::Int16 => "Int16View",
            ElementKind::Uint16 => "Uint16View",
            ElementKind::Int32 => "Int32View",
            ElementKind::Uint32 => "Uint32View",
            ElementKind::Float32 => "Float32View",
            ElementKind::Float64 => "Float64View",
        }
    }

    /// Read element `index` from `bytes`, which must start at the view's
    /// base and cover at least `(index + 1) * size()` bytes.
    pub fn read_element(&self, bytes: &[u8], index: usize) -> Value {
        let at = index * self.size();
        match self {
            ElementKind::Int8 => Value::from_i64(bytes[at] as i8 as i64),
            ElementKind::Uint8 => Value::from_i64(bytes[at] as i64),
            ElementKind::Int16 => {
                let mut raw = [0u8; 2];
                raw.copy_from_slice(&bytes[at..at + 2]);
                Value::from_i64(i16::from_ne_bytes(raw) as i64)
            }
            ElementKind::Uint16 => {
                let mut raw = [0u8; 2];
                raw.copy_from_slice(&bytes[at..at + 2]);
                Value::from_i64(u16::from_ne_bytes(raw) as i64)
            }
            ElementKind::Int32 => {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(&bytes[at..at + 4]);
                Value::from_i64(i32::from_ne_bytes(raw) as i64)
            }
            ElementKind::Uint32 => {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(&bytes[at..at + 4]);
                Value::from_i64(u32::from_ne_bytes(raw) as i64)
            }
            ElementKind::Float32 => {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(&bytes[at..at + 4]);
                Value::from_f64(f32::from_ne_bytes(raw) as f64)
            }
            ElementKind::Float64 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&bytes[at..at + 8]);
                Value::from_f64(f64::from_ne_bytes(raw))
            }
        }
    }

    /// Write `value` as element `index` of `bytes`. Integer kinds narrow
    /// through i64, so fractions truncate and magnitudes wrap modulo the
    /// element width. Bounds are the caller's responsibility.
    pub fn write_element(&self, bytes: &mut [u8], index: usize, value: f64) {
        let at = index * self.size();
        match self {
            ElementKind::Int8 => bytes[at] = value as i64 as i8 as u8,
            ElementKind::Uint8 => bytes[at] = value as i64 as u8,
            ElementKind::Int16 => {
                bytes[at..at + 2].copy_from_slice(&(value as i64 as i16).to_ne_bytes());
            }
            ElementKind::Uint16 => {
                bytes[at..at + 2].copy_from_slice(&(value as i64 as u16).to_ne_bytes());
            }
            ElementKind::Int32 => {
                bytes[at..at + 4].copy_from_slice(&(value as i64 as i32).to_ne_bytes());
            }
            ElementKind::Uint32 => {
                bytes[at..at + 4].copy_from_slice(&(value as i64 as u32).to_ne_bytes());
            }
            ElementKind::Float32 => {
                bytes[at..at + 4].copy_from_slice(&(value as f32).to_ne_bytes());
            }
            ElementKind::Float64 => {
                bytes[at..at + 8].copy_from_slice(&value.to_ne_bytes());
            }
        }
    }
}

/// Where a view's bytes live.
#[derive(Debug)]
pub enum Storage {
    /// The view owns its allocation.
    Owned(RawData),
    /// The view reads a range of an owning buffer. `parent` always refers
    /// to an `Owned` view; chains collapse at construction time.
    Alias { parent: Value, byte_offset: usize },
}

/// Lifecycle of a view's backing storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReclaimState {
    Live,
    Finalizing,
    Reclaimed,
}

/// A typed view or buffer object on the heap.
#[derive(Debug)]
pub struct ViewInstance {
    pub kind: ElementKind,
    pub length: usize,
    pub storage: Storage,
    pub state: ReclaimState,
    /// Buffers are byte views that other views may alias.
    pub is_buffer: bool,
}

impl ViewInstance {
    pub fn owning(kind: ElementKind, length: usize, data: RawData, is_buffer: bool) -> Self {
        Self {
            kind,
            length,
            storage: Storage::Owned(data),
            state: ReclaimState::Live,
            is_buffer,
        }
    }

    pub fn aliasing(
        kind: ElementKind,
        length: usize,
        parent: Value,
        byte_offset: usize,
        is_buffer: bool,
    ) -> Self {
        Self {
            kind,
            length,
            storage: Storage::Alias {
                parent,
                byte_offset,
            },
            state: ReclaimState::Live,
            is_buffer,
        }
    }

    pub fn byte_length(&self) -> usize {
        self.length * self.kind.size()
    }

    /// Release backing storage. Runs at most once; an alias only flips its
    /// state because the owning buffer frees itself.
    pub fn finalize(&mut self) {
        if self.state != ReclaimState::Live {
            return;
        }
        self.state = ReclaimState::Finalizing;
        if let Storage::Owned(data) = &mut self.storage {
            data.release();
        }
        self.state = ReclaimState::Reclaimed;
    }
}
