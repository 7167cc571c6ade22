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

use libloading::{Library, Symbol};
use std::{path::Path, process::Command};

const FFI_LIB_PATH: &str = env!("FFI_LIB_PATH"); // Set by build.rs

const EXPECTED_SYMBOLS: &[&str] = &[
    "roomkit_ffi_initialize",
    "roomkit_ffi_participant_identity",
    "roomkit_ffi_participant_sid",
    "roomkit_ffi_participant_info",
    "roomkit_ffi_participant_is_connected",
    "roomkit_ffi_participant_release",
    "roomkit_ffi_drop_handle",
    "roomkit_ffi_dispose",
    "JNI_OnLoad",
    "Java_io_roomkit_video_Participant_nativeGetIdentity",
    "Java_io_roomkit_video_Participant_nativeGetSid",
    "Java_io_roomkit_video_Participant_nativeIsConnected",
    "Java_io_roomkit_video_Participant_nativeRelease",
];

#[test]
fn lib_load_test() {
    println!("Library path: {}", FFI_LIB_PATH);
    build_lib_if_required();
    unsafe {
        let lib = Library::new(FFI_LIB_PATH).expect("Unable to load library");
        for symbol in EXPECTED_SYMBOLS {
            let _loaded_symbol: Symbol<unsafe extern "C" fn() -> u32> =
                lib.get(symbol.as_bytes()).unwrap_or_else(|_| panic!("Missing symbol: {}", symbol));
        }
    }
}

#[test]
fn released_handle_is_rejected_across_the_c_abi() {
    build_lib_if_required();
    unsafe {
        let lib = Library::new(FFI_LIB_PATH).expect("Unable to load library");
        let release: Symbol<extern "C" fn(u64) -> bool> =
            lib.get(b"roomkit_ffi_participant_release").unwrap();
        let is_connected: Symbol<unsafe extern "C" fn(u64, *mut bool) -> bool> =
            lib.get(b"roomkit_ffi_participant_is_connected").unwrap();

        // Nothing was minted in the loaded library, every handle is unknown
        assert!(!release(0));
        assert!(!release(7));
        let mut connected = false;
        assert!(!is_connected(7, &mut connected));

        // The handle server started its deadlock detector thread inside the library,
        // unloading the code under a running thread is undefined
        drop(release);
        drop(is_connected);
        std::mem::forget(lib);
    }
}

fn build_lib_if_required() {
    let path = Path::new(FFI_LIB_PATH);
    if !path.try_exists().unwrap() {
        println!("Library not found, building…");
        let status = Command::new(env!("CARGO"))
            .args(["build", "--lib", "-p", env!("CARGO_PKG_NAME")])
            .status()
            .expect("Failed to run cargo build for test");

        if !status.success() || !path.try_exists().unwrap() {
            panic!("Failed to build lib to run test");
        }
    }
}
