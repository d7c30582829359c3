//! widcfg-ffi: C-ABI exports for the widcfg configuration table and codec.

mod args;
mod codec;
mod error;
mod table;
mod types;

use std::panic::AssertUnwindSafe;

pub use codec::{widcfg_encode, widcfg_encode_query};
pub use table::{widcfg_deinit, widcfg_dispatch, widcfg_init, widcfg_read};
pub use types::{
    WidcfgCallbacks, WidcfgEventFn, WidcfgHandle, WidcfgResponse, WidcfgResult, WIDCFG_ERR_FRAME,
    WIDCFG_ERR_INTERNAL, WIDCFG_ERR_INVALID_ARGUMENT, WIDCFG_ERR_TABLE, WIDCFG_OK,
    WIDCFG_RSP_CFG, WIDCFG_RSP_STATUS, WIDCFG_RSP_UNSET,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

#[no_mangle]
pub extern "C" fn widcfg_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    #[test]
    fn last_error_is_empty_after_success() {
        let handle = widcfg_init();
        assert!(!handle.is_null());
        let ptr = widcfg_last_error();
        assert!(!ptr.is_null());

        // SAFETY: widcfg_last_error returns a pointer to a thread-local CString.
        let text = unsafe { CStr::from_ptr(ptr).to_str().unwrap() };
        assert!(text.is_empty());

        // SAFETY: Handle came from widcfg_init.
        unsafe { widcfg_deinit(handle) };
    }

    #[test]
    fn last_error_describes_invalid_argument() {
        // SAFETY: Frame pointer is null and must be rejected before use.
        let n = unsafe { widcfg_encode_query(std::ptr::null_mut(), 8, 0, 0x0005) };
        assert_eq!(n, 0);

        // SAFETY: widcfg_last_error returns a pointer to a thread-local CString.
        let text = unsafe { CStr::from_ptr(widcfg_last_error()).to_str().unwrap() };
        assert!(text.contains("frame cannot be null"));
    }
}
