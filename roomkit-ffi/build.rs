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

use std::{env, path::PathBuf};

fn main() {
    // Used by tests/lib_load_test.rs to find the cdylib next to the other build artifacts
    // OUT_DIR is <target>/<profile>/build/<pkg>-<hash>/out
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let profile_dir = out_dir.ancestors().nth(3).unwrap().to_path_buf();

    let lib_name = env::var("CARGO_PKG_NAME").unwrap().replace('-', "_");
    let file_name = match env::var("CARGO_CFG_TARGET_OS").unwrap().as_str() {
        "windows" => format!("{}.dll", lib_name),
        "macos" | "ios" => format!("lib{}.dylib", lib_name),
        _ => format!("lib{}.so", lib_name),
    };

    println!("cargo:rustc-env=FFI_LIB_PATH={}", profile_dir.join(file_name).display());
    println!("cargo:rerun-if-changed=build.rs");
}
