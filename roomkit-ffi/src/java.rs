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

//! JNI entry points of `io.roomkit.video.Participant`.
//! They replace the `com.twilio.video.Participant` natives (`nativeGetIdentity`,
//! `nativeGetSid`, `nativeIsConnected`, `nativeRelease`) with the same signatures,
//! only the Java package differs.
//! Errors are thrown as `IllegalStateException` on the calling thread.

use std::os::raw::c_void;

use jni::objects::JObject;
use jni::sys::{jboolean, jint, jlong, jstring, JNI_FALSE, JNI_TRUE, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};

use crate::{server::requests, FfiError, FfiHandleId, FfiResult, FFI_SERVER};

const ILLEGAL_STATE_EXCEPTION: &str = "java/lang/IllegalStateException";

#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn JNI_OnLoad(_vm: JavaVM, _: *mut c_void) -> jint {
    log::info!("JNI_OnLoad, roomkit-ffi v{}", env!("CARGO_PKG_VERSION"));
    JNI_VERSION_1_6
}

#[no_mangle]
pub extern "system" fn Java_io_roomkit_video_Participant_nativeGetIdentity<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    handle: jlong,
) -> jstring {
    let res = handle_id(handle).and_then(|handle| requests::on_get_identity(&FFI_SERVER, handle));
    into_jstring(&mut env, res)
}

#[no_mangle]
pub extern "system" fn Java_io_roomkit_video_Participant_nativeGetSid<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    handle: jlong,
) -> jstring {
    let res = handle_id(handle).and_then(|handle| requests::on_get_sid(&FFI_SERVER, handle));
    into_jstring(&mut env, res)
}

#[no_mangle]
pub extern "system" fn Java_io_roomkit_video_Participant_nativeIsConnected<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    handle: jlong,
) -> jboolean {
    match handle_id(handle).and_then(|handle| requests::on_is_connected(&FFI_SERVER, handle)) {
        Ok(true) => JNI_TRUE,
        Ok(false) => JNI_FALSE,
        Err(err) => {
            throw(&mut env, err);
            JNI_FALSE
        }
    }
}

#[no_mangle]
pub extern "system" fn Java_io_roomkit_video_Participant_nativeRelease<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    handle: jlong,
) {
    if let Err(err) = handle_id(handle).and_then(|handle| requests::on_release(&FFI_SERVER, handle))
    {
        throw(&mut env, err);
    }
}

fn handle_id(handle: jlong) -> FfiResult<FfiHandleId> {
    FfiHandleId::try_from(handle).map_err(|_| FfiError::InvalidHandle(handle as FfiHandleId))
}

fn into_jstring(env: &mut JNIEnv, res: FfiResult<String>) -> jstring {
    match res {
        Ok(value) => match env.new_string(value) {
            Ok(value) => value.into_raw(),
            Err(err) => {
                log::error!("failed to create a java string: {:?}", err);
                std::ptr::null_mut()
            }
        },
        Err(err) => {
            throw(env, err);
            std::ptr::null_mut()
        }
    }
}

fn throw(env: &mut JNIEnv, err: FfiError) {
    log::error!("{}", err);
    if let Err(err) = env.throw_new(ILLEGAL_STATE_EXCEPTION, err.to_string()) {
        log::error!("failed to throw {}: {:?}", ILLEGAL_STATE_EXCEPTION, err);
    }
}
