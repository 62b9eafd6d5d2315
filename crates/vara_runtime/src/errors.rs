//! Common error message constants used throughout the runtime.

pub mod messages {
    pub const NOT_A_LIST: &str = "Not a list";
    pub const NOT_A_VIEW: &str = "Not a view";
    pub const NOT_A_BUFFER: &str = "Not an array buffer";
    pub const INDEX_OUT_OF_BOUNDS: &str = "Index out of bounds";

    pub const LENGTH_NEGATIVE: &str = "Array length must not be negative.";
    pub const LENGTH_TOO_LARGE: &str = "Array length exceeds maximum length.";
    pub const OFFSET_MISALIGNED: &str = "Offset must be a multiple of element size.";
    pub const OFFSET_PAST_END: &str = "Offset must be less than the array buffer length.";
    pub const SPAN_NOT_MULTIPLE: &str =
        "Array buffer length minus the byte offset must be a multiple of the element size";
    pub const LENGTH_PAST_END: &str =
        "length references an area beyond the end of the array buffer.";
    pub const BUFFER_NO_DATA: &str = "ArrayBuffer doesn't have data.";
    pub const ALLOCATION_FAILED: &str = "Memory allocation failed.";

    pub const EXPECTED_ONE_ARGUMENT: &str = "Expected exactly one argument.";
    pub const EXPECTED_SOME_ARGUMENT: &str = "Expected at least one argument.";
    pub const BUFFER_FORM_ARITY: &str =
        "Array constructor from ArrayBuffer must have 1-3 parameters.";
}
