use widcfg_dispatch::dispatch_to;
use widcfg_frame::Wid;
use widcfg_table::ConfigTable;

use crate::args;
use crate::error;
use crate::types::{TableHandle, WidcfgCallbacks, WidcfgHandle, WidcfgResponse, WidcfgResult};

fn with_table_mut<T>(
    handle: WidcfgHandle,
    on_error: T,
    f: impl FnOnce(&mut TableHandle) -> T,
) -> T {
    if handle.is_null() {
        let _ = error::set_invalid_argument("table handle cannot be null");
        return on_error;
    }

    let table_handle = {
        // SAFETY: Pointer validity is guaranteed by the caller.
        unsafe { &mut *(handle as *mut TableHandle) }
    };

    f(table_handle)
}

/// Build a configuration table from the default seed.
///
/// Returns null on failure; see `widcfg_last_error`.
#[no_mangle]
pub extern "C" fn widcfg_init() -> WidcfgHandle {
    crate::ffi_boundary(std::ptr::null_mut(), || {
        error::clear_error_state();

        match ConfigTable::init() {
            Ok(table) => Box::into_raw(Box::new(TableHandle { table })) as WidcfgHandle,
            Err(err) => {
                let _ = error::map_table_error(&err);
                std::ptr::null_mut()
            }
        }
    })
}

/// Release a table handle.
///
/// # Safety
/// `handle` must be null or a handle returned by `widcfg_init` that has not been released.
#[no_mangle]
pub unsafe extern "C" fn widcfg_deinit(handle: WidcfgHandle) {
    crate::ffi_boundary((), || {
        if handle.is_null() {
            return;
        }

        // SAFETY: Caller guarantees this handle was allocated by widcfg_init.
        let handle = unsafe { Box::from_raw(handle as *mut TableHandle) };
        handle.table.deinit();
    });
}

/// Copy the stored value for `id` into `out`.
///
/// Returns the bytes copied, or 0 for untracked ids or a buffer that is too small.
///
/// # Safety
/// `handle` must be a valid handle. If `out_len > 0`, `out` must be writable for `out_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn widcfg_read(
    handle: WidcfgHandle,
    id: u16,
    out: *mut u8,
    out_len: usize,
) -> u32 {
    crate::ffi_boundary(0, || {
        error::clear_error_state();

        with_table_mut(handle, 0, |table_handle| {
            // SAFETY: We validate pointer/length pairing in helper.
            let Some(out) = (unsafe { args::bytes_arg_mut(out, out_len, "out") }) else {
                return 0;
            };
            u32::try_from(table_handle.table.read(Wid(id), out)).unwrap_or(0)
        })
    })
}

/// Dispatch one inbound frame: update the table and invoke event callbacks.
///
/// # Safety
/// `handle` must be a valid handle. If `len > 0`, `frame` must be readable for `len` bytes.
/// `callbacks` may be null. `out_rsp` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn widcfg_dispatch(
    handle: WidcfgHandle,
    frame: *const u8,
    len: usize,
    callbacks: *const WidcfgCallbacks,
    out_rsp: *mut WidcfgResponse,
) -> WidcfgResult {
    crate::ffi_boundary(WidcfgResult::Internal, || {
        error::clear_error_state();

        // SAFETY: We validate pointer/length pairing in helper.
        let Some(frame) = (unsafe { args::bytes_arg(frame, len, "frame") }) else {
            return WidcfgResult::InvalidArgument;
        };
        let mut callbacks = if callbacks.is_null() {
            WidcfgCallbacks::default()
        } else {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { *callbacks }
        };

        with_table_mut(handle, WidcfgResult::InvalidArgument, |table_handle| {
            match dispatch_to(&mut table_handle.table, frame, &mut callbacks) {
                Ok(rsp) => {
                    if !out_rsp.is_null() {
                        // SAFETY: Pointer validity is guaranteed by the caller.
                        unsafe { *out_rsp = rsp.into() };
                    }
                    WidcfgResult::Ok
                }
                Err(err) => error::map_dispatch_error(&err),
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use std::ffi::c_void;

    use super::*;
    use crate::types::{WIDCFG_RSP_CFG, WIDCFG_RSP_STATUS};

    extern "C" fn count_event(_frame: *const u8, len: usize, user_data: *mut c_void) {
        // SAFETY: Tests pass a pointer to a live `usize`.
        let seen = unsafe { &mut *(user_data as *mut usize) };
        *seen += len;
    }

    #[test]
    fn response_frame_is_readable_back() {
        let handle = widcfg_init();
        assert!(!handle.is_null());

        let frame = [b'R', 7, 0, 0, 0x05, 0x00, 0x01, 0x00, 0x03];
        let mut rsp = WidcfgResponse::default();
        // SAFETY: All pointers are live for the call.
        let result = unsafe {
            widcfg_dispatch(handle, frame.as_ptr(), frame.len(), std::ptr::null(), &mut rsp)
        };
        assert_eq!(result, WidcfgResult::Ok);
        assert_eq!(rsp, WidcfgResponse { kind: WIDCFG_RSP_CFG, seq_no: 7 });

        let mut out = [0u8; 4];
        // SAFETY: Handle and buffer are live for the call.
        let n = unsafe { widcfg_read(handle, 0x0005, out.as_mut_ptr(), out.len()) };
        assert_eq!(n, 1);
        assert_eq!(out[0], 3);

        // SAFETY: Handle came from widcfg_init.
        unsafe { widcfg_deinit(handle) };
    }

    #[test]
    fn info_frame_invokes_callback_with_whole_frame() {
        let handle = widcfg_init();
        let frame = [b'I', 2, 0, 0, 0x05, 0x00, 0x01, 0x01];
        let mut seen = 0usize;
        let callbacks = WidcfgCallbacks {
            on_general_async_info: Some(count_event),
            user_data: &mut seen as *mut usize as *mut c_void,
            ..WidcfgCallbacks::default()
        };
        let mut rsp = WidcfgResponse::default();

        // SAFETY: All pointers are live for the call.
        let result =
            unsafe { widcfg_dispatch(handle, frame.as_ptr(), frame.len(), &callbacks, &mut rsp) };
        assert_eq!(result, WidcfgResult::Ok);
        assert_eq!(rsp, WidcfgResponse { kind: WIDCFG_RSP_STATUS, seq_no: 2 });
        assert_eq!(seen, frame.len());

        // SAFETY: Handle came from widcfg_init.
        unsafe { widcfg_deinit(handle) };
    }

    #[test]
    fn short_frame_reports_frame_error() {
        let handle = widcfg_init();
        let frame = [b'R', 1];
        // SAFETY: All pointers are live for the call.
        let result = unsafe {
            widcfg_dispatch(handle, frame.as_ptr(), frame.len(), std::ptr::null(), std::ptr::null_mut())
        };
        assert_eq!(result, WidcfgResult::FrameError);

        // SAFETY: Handle came from widcfg_init.
        unsafe { widcfg_deinit(handle) };
    }

    #[test]
    fn null_handle_is_rejected() {
        let frame = [b'R', 1, 0, 0];
        // SAFETY: Null handle is rejected before use.
        let result = unsafe {
            widcfg_dispatch(
                std::ptr::null_mut(),
                frame.as_ptr(),
                frame.len(),
                std::ptr::null(),
                std::ptr::null_mut(),
            )
        };
        assert_eq!(result, WidcfgResult::InvalidArgument);
        // SAFETY: Null handle is rejected before use.
        assert_eq!(unsafe { widcfg_read(std::ptr::null_mut(), 5, std::ptr::null_mut(), 0) }, 0);
    }
}
