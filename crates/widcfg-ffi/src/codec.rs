use widcfg_frame::{encode, encode_query, Wid};

use crate::args;
use crate::error;

fn written(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(0)
}

/// Encode one record for `id` at `offset` into `frame`.
///
/// Returns the bytes written, or 0 if the record does not fit, the id has an
/// unknown kind, or an argument is invalid. Records never extend past
/// `MAX_CFG_FRAME_SIZE`, whatever `frame_len` is.
///
/// # Safety
/// If `frame_len > 0`, `frame` must be non-null and writable for `frame_len` bytes.
/// If `size > 0`, `value` must be non-null and readable for `size` bytes.
#[no_mangle]
pub unsafe extern "C" fn widcfg_encode(
    frame: *mut u8,
    frame_len: usize,
    offset: u32,
    id: u16,
    value: *const u8,
    size: u32,
) -> u32 {
    crate::ffi_boundary(0, || {
        error::clear_error_state();

        // SAFETY: We validate pointer/length pairing in helper.
        let Some(frame) = (unsafe { args::bytes_arg_mut(frame, frame_len, "frame") }) else {
            return 0;
        };
        // SAFETY: We validate pointer/length pairing in helper.
        let Some(value) = (unsafe { args::bytes_arg(value, size as usize, "value") }) else {
            return 0;
        };

        written(encode(frame, offset as usize, Wid(id), value))
    })
}

/// Encode a query (bare id) at `offset` into `frame`.
///
/// # Safety
/// If `frame_len > 0`, `frame` must be non-null and writable for `frame_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn widcfg_encode_query(
    frame: *mut u8,
    frame_len: usize,
    offset: u32,
    id: u16,
) -> u32 {
    crate::ffi_boundary(0, || {
        error::clear_error_state();

        // SAFETY: We validate pointer/length pairing in helper.
        let Some(frame) = (unsafe { args::bytes_arg_mut(frame, frame_len, "frame") }) else {
            return 0;
        };

        written(encode_query(frame, offset as usize, Wid(id)))
    })
}
