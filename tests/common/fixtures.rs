//! Pickles written by CPython's `pickle.dumps`.
//!
//! Protocols 4 and 5 are what Python 3.8+ emits by default: they carry FRAME,
//! MEMOIZE and SHORT_BINUNICODE opcodes and keep tuples as tuples, none of
//! which `serde_pickle`'s own writer produces.

/// `pickle.dumps([{"a": 1.5, "b": [[1, 2], [3, 4]]}], protocol=4)`
pub const MATRIX_PROTO4: &[u8] =
    b"\x80\x04\x95-\x00\x00\x00\x00\x00\x00\x00]\x94}\x94(\x8c\x01a\x94G?\xf8\x00\x00\x00\x00\x00\x00\x8c\x01b\x94]\x94(]\x94(K\x01K\x02e]\x94(K\x03K\x04eeua.";

/// `pickle.dumps([{"a": 1.5, "b": [[1, 2], [3, 4]]}], protocol=5)`
pub const MATRIX_PROTO5: &[u8] =
    b"\x80\x05\x95-\x00\x00\x00\x00\x00\x00\x00]\x94}\x94(\x8c\x01a\x94G?\xf8\x00\x00\x00\x00\x00\x00\x8c\x01b\x94]\x94(]\x94(K\x01K\x02e]\x94(K\x03K\x04eeua.";

/// `pickle.dumps([{"x": 7}, {"x": [9, 10]}], protocol=4)`
pub const MIXED_PROTO4: &[u8] =
    b"\x80\x04\x95\x1b\x00\x00\x00\x00\x00\x00\x00]\x94(}\x94\x8c\x01x\x94K\x07s}\x94h\x02]\x94(K\x09K\x0aese.";

/// `pickle.dumps([{"x": 7}, {"x": [9, 10]}], protocol=5)`
pub const MIXED_PROTO5: &[u8] =
    b"\x80\x05\x95\x1b\x00\x00\x00\x00\x00\x00\x00]\x94(}\x94\x8c\x01x\x94K\x07s}\x94h\x02]\x94(K\x09K\x0aese.";

/// `pickle.dumps([{"a": (1, 2), "b": 3}], protocol=4)`
pub const TUPLE_PROTO4: &[u8] =
    b"\x80\x04\x95\x18\x00\x00\x00\x00\x00\x00\x00]\x94}\x94(\x8c\x01a\x94K\x01K\x02\x86\x94\x8c\x01b\x94K\x03ua.";

/// `pickle.dumps([{"a": (1, 2), "b": 3}], protocol=5)`
pub const TUPLE_PROTO5: &[u8] =
    b"\x80\x05\x95\x18\x00\x00\x00\x00\x00\x00\x00]\x94}\x94(\x8c\x01a\x94K\x01K\x02\x86\x94\x8c\x01b\x94K\x03ua.";

/// `pickle.dumps([{"a": 2**70, "b": [1, 2], "c": [-2**80, 1]}], protocol=4)`
pub const BIG_INT_PROTO4: &[u8] =
    b"\x80\x04\x95:\x00\x00\x00\x00\x00\x00\x00]\x94}\x94(\x8c\x01a\x94\x8a\x09\x00\x00\x00\x00\x00\x00\x00\x00@\x8c\x01b\x94]\x94(K\x01K\x02e\x8c\x01c\x94]\x94(\x8a\x0b\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\xffK\x01eua.";

/// `pickle.dumps([{"a": 2**70, "b": [1, 2], "c": [-2**80, 1]}], protocol=5)`
pub const BIG_INT_PROTO5: &[u8] =
    b"\x80\x05\x95:\x00\x00\x00\x00\x00\x00\x00]\x94}\x94(\x8c\x01a\x94\x8a\x09\x00\x00\x00\x00\x00\x00\x00\x00@\x8c\x01b\x94]\x94(K\x01K\x02e\x8c\x01c\x94]\x94(\x8a\x0b\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\xffK\x01eua.";

/// `pickle.dumps([{"y": "not-a-number"}], protocol=4)`
pub const NOT_A_NUMBER_PROTO4: &[u8] =
    b"\x80\x04\x95\x1a\x00\x00\x00\x00\x00\x00\x00]\x94}\x94\x8c\x01y\x94\x8c\x0cnot-a-number\x94sa.";

/// `pickle.dumps([{"y": "not-a-number"}], protocol=5)`
pub const NOT_A_NUMBER_PROTO5: &[u8] =
    b"\x80\x05\x95\x1a\x00\x00\x00\x00\x00\x00\x00]\x94}\x94\x8c\x01y\x94\x8c\x0cnot-a-number\x94sa.";
