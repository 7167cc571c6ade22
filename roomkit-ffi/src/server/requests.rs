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

use prost::Message;

use super::{participant::FfiParticipant, FfiServer};
use crate::{proto, FfiHandleId, FfiResult};

/// Identity of the participant behind the handle
pub fn on_get_identity(server: &FfiServer, handle: FfiHandleId) -> FfiResult<String> {
    let ffi_participant = server.retrieve_handle::<FfiParticipant>(handle)?;
    Ok(ffi_participant.identity())
}

/// Session id of the participant behind the handle
pub fn on_get_sid(server: &FfiServer, handle: FfiHandleId) -> FfiResult<String> {
    let ffi_participant = server.retrieve_handle::<FfiParticipant>(handle)?;
    Ok(ffi_participant.sid())
}

/// Snapshot of the connection flag at call time
pub fn on_is_connected(server: &FfiServer, handle: FfiHandleId) -> FfiResult<bool> {
    let ffi_participant = server.retrieve_handle::<FfiParticipant>(handle)?;
    Ok(ffi_participant.is_connected())
}

pub fn on_get_info(server: &FfiServer, handle: FfiHandleId) -> FfiResult<proto::ParticipantInfo> {
    let ffi_participant = server.retrieve_handle::<FfiParticipant>(handle)?;
    Ok(ffi_participant.info())
}

/// Same as on_get_info but already encoded for the C ABI
pub fn on_get_info_encoded(server: &FfiServer, handle: FfiHandleId) -> FfiResult<Vec<u8>> {
    Ok(on_get_info(server, handle)?.encode_to_vec())
}

/// Drop the handle's share of the participant.
/// The participant itself is only freed once every other owner is gone.
/// Releasing twice fails with DoubleRelease and leaves memory untouched.
pub fn on_release(server: &FfiServer, handle: FfiHandleId) -> FfiResult<()> {
    let ffi_participant = server.take_handle::<FfiParticipant>(handle)?;
    log::debug!(
        "released participant handle {} ({} owners left)",
        handle,
        ffi_participant.participant.strong_count() - 1
    );
    Ok(())
}
