use std::ffi::c_void;

use widcfg_dispatch::{CfgResponse, EventSink, ResponseKind};
use widcfg_table::ConfigTable;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidcfgResult {
    Ok = 0,
    InvalidArgument = 1,
    FrameError = 2,
    TableError = 3,
    Internal = 99,
}

#[allow(dead_code)]
pub const WIDCFG_OK: WidcfgResult = WidcfgResult::Ok;
#[allow(dead_code)]
pub const WIDCFG_ERR_INVALID_ARGUMENT: WidcfgResult = WidcfgResult::InvalidArgument;
#[allow(dead_code)]
pub const WIDCFG_ERR_FRAME: WidcfgResult = WidcfgResult::FrameError;
#[allow(dead_code)]
pub const WIDCFG_ERR_TABLE: WidcfgResult = WidcfgResult::TableError;
#[allow(dead_code)]
pub const WIDCFG_ERR_INTERNAL: WidcfgResult = WidcfgResult::Internal;

pub const WIDCFG_RSP_UNSET: i32 = 0;
pub const WIDCFG_RSP_CFG: i32 = 1;
pub const WIDCFG_RSP_STATUS: i32 = 2;

/// Response classification written by `widcfg_dispatch`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidcfgResponse {
    pub kind: i32,
    pub seq_no: u8,
}

impl From<CfgResponse> for WidcfgResponse {
    fn from(rsp: CfgResponse) -> Self {
        let kind = match rsp.kind {
            ResponseKind::Unset => WIDCFG_RSP_UNSET,
            ResponseKind::Cfg => WIDCFG_RSP_CFG,
            ResponseKind::Status => WIDCFG_RSP_STATUS,
        };
        Self {
            kind,
            seq_no: rsp.seq_no,
        }
    }
}

/// Event callback: full frame pointer, frame length, user data.
pub type WidcfgEventFn = Option<extern "C" fn(*const u8, usize, *mut c_void)>;

/// Event callbacks for `widcfg_dispatch`. Any entry may be null.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WidcfgCallbacks {
    pub on_general_async_info: WidcfgEventFn,
    pub on_network_info: WidcfgEventFn,
    pub on_scan_complete: WidcfgEventFn,
    pub user_data: *mut c_void,
}

impl Default for WidcfgCallbacks {
    fn default() -> Self {
        Self {
            on_general_async_info: None,
            on_network_info: None,
            on_scan_complete: None,
            user_data: std::ptr::null_mut(),
        }
    }
}

fn invoke(callback: WidcfgEventFn, frame: &[u8], user_data: *mut c_void) {
    if let Some(callback) = callback {
        callback(frame.as_ptr(), frame.len(), user_data);
    }
}

impl EventSink for WidcfgCallbacks {
    fn on_general_async_info(&mut self, frame: &[u8]) {
        invoke(self.on_general_async_info, frame, self.user_data);
    }

    fn on_network_info(&mut self, frame: &[u8]) {
        invoke(self.on_network_info, frame, self.user_data);
    }

    fn on_scan_complete(&mut self, frame: &[u8]) {
        invoke(self.on_scan_complete, frame, self.user_data);
    }
}

pub type WidcfgHandle = *mut c_void;

pub(crate) struct TableHandle {
    pub(crate) table: ConfigTable,
}
