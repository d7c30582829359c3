use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

use widcfg_dispatch::DispatchError;
use widcfg_table::TableError;

use crate::types::WidcfgResult;

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

pub(crate) fn clear_error_state() {
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::default();
    });
}

pub(crate) fn set_error_message(message: impl Into<String>) {
    let sanitized = message.into().replace('\0', "?");
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::new(sanitized).unwrap_or_default();
    });
}

pub(crate) fn set_invalid_argument(message: impl Into<String>) -> WidcfgResult {
    set_error_message(message);
    WidcfgResult::InvalidArgument
}

pub(crate) fn set_panic_error() {
    set_error_message("panic across FFI boundary");
}

pub(crate) fn map_table_error(err: &TableError) -> WidcfgResult {
    set_error_message(err.to_string());
    WidcfgResult::TableError
}

pub(crate) fn map_dispatch_error(err: &DispatchError) -> WidcfgResult {
    set_error_message(err.to_string());
    match err {
        DispatchError::Frame(_) => WidcfgResult::FrameError,
    }
}

pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|state| state.borrow().as_ptr())
}
