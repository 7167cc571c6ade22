// Copyright 2025 LiveKit, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::{
    server::{requests, FfiConfig, FfiDataBuffer},
    FfiError, FfiHandleId, FfiResult, FFI_SERVER, INVALID_HANDLE,
};

/// # Safety
///
/// The foreign language must only provide valid, nul terminated strings
#[no_mangle]
pub unsafe extern "C" fn roomkit_ffi_initialize(
    sdk: *const c_char,
    sdk_version: *const c_char,
) -> bool {
    if sdk.is_null() || sdk_version.is_null() {
        log::error!("roomkit_ffi_initialize called with a null pointer");
        return false;
    }

    FFI_SERVER.setup(FfiConfig {
        sdk: CStr::from_ptr(sdk).to_string_lossy().into_owned(),
        sdk_version: CStr::from_ptr(sdk_version).to_string_lossy().into_owned(),
    });

    log::info!("initializing ffi server v{}", env!("CARGO_PKG_VERSION"));
    true
}

/// # Safety
///
/// res_ptr and res_len must be valid for writes.
/// The returned buffer lives until its handle is dropped with roomkit_ffi_drop_handle
#[no_mangle]
pub unsafe extern "C" fn roomkit_ffi_participant_identity(
    handle: FfiHandleId,
    res_ptr: *mut *const u8,
    res_len: *mut usize,
) -> FfiHandleId {
    respond_with_buffer("identity", res_ptr, res_len, || {
        requests::on_get_identity(&FFI_SERVER, handle).map(String::into_bytes)
    })
}

/// # Safety
///
/// Same contract as roomkit_ffi_participant_identity
#[no_mangle]
pub unsafe extern "C" fn roomkit_ffi_participant_sid(
    handle: FfiHandleId,
    res_ptr: *mut *const u8,
    res_len: *mut usize,
) -> FfiHandleId {
    respond_with_buffer("sid", res_ptr, res_len, || {
        requests::on_get_sid(&FFI_SERVER, handle).map(String::into_bytes)
    })
}

/// The buffer contains an encoded proto::ParticipantInfo
///
/// # Safety
///
/// Same contract as roomkit_ffi_participant_identity
#[no_mangle]
pub unsafe extern "C" fn roomkit_ffi_participant_info(
    handle: FfiHandleId,
    res_ptr: *mut *const u8,
    res_len: *mut usize,
) -> FfiHandleId {
    respond_with_buffer("info", res_ptr, res_len, || {
        requests::on_get_info_encoded(&FFI_SERVER, handle)
    })
}

/// Returns false if the handle is invalid, `connected` is left untouched in that case
///
/// # Safety
///
/// connected must be valid for writes
#[no_mangle]
pub unsafe extern "C" fn roomkit_ffi_participant_is_connected(
    handle: FfiHandleId,
    connected: *mut bool,
) -> bool {
    let res = panic::catch_unwind(|| -> FfiResult<bool> {
        if connected.is_null() {
            return Err(FfiError::InvalidRequest("connected is null".into()));
        }
        requests::on_is_connected(&FFI_SERVER, handle)
    });

    match res {
        Ok(Ok(is_connected)) => {
            *connected = is_connected;
            true
        }
        Ok(Err(err)) => {
            log::error!("failed to read connection state: {}", err);
            false
        }
        Err(err) => {
            log::error!("panic while reading connection state: {:?}", err);
            false
        }
    }
}

#[no_mangle]
pub extern "C" fn roomkit_ffi_participant_release(handle: FfiHandleId) -> bool {
    match panic::catch_unwind(|| requests::on_release(&FFI_SERVER, handle)) {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            log::error!("failed to release participant: {}", err);
            false
        }
        Err(err) => {
            log::error!("panic while releasing participant: {:?}", err);
            false
        }
    }
}

#[no_mangle]
pub extern "C" fn roomkit_ffi_drop_handle(handle_id: FfiHandleId) -> bool {
    FFI_SERVER.drop_handle(handle_id)
}

#[no_mangle]
pub extern "C" fn roomkit_ffi_dispose() {
    FFI_SERVER.dispose();
}

unsafe fn respond_with_buffer(
    request: &str,
    res_ptr: *mut *const u8,
    res_len: *mut usize,
    f: impl FnOnce() -> FfiResult<Vec<u8>>,
) -> FfiHandleId {
    if res_ptr.is_null() || res_len.is_null() {
        log::error!("{} request called with a null result pointer", request);
        return INVALID_HANDLE;
    }

    let data = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(data)) => data,
        Ok(Err(err)) => {
            log::error!("failed to handle {} request: {}", request, err);
            return INVALID_HANDLE;
        }
        Err(err) => {
            log::error!("panic while handling {} request: {:?}", request, err);
            return INVALID_HANDLE;
        }
    };

    let handle = FFI_SERVER.next_id();
    let data = Arc::new(data);
    *res_ptr = data.as_ptr();
    *res_len = data.len();

    FFI_SERVER.store_handle(handle, FfiDataBuffer { handle, data });
    handle
}
