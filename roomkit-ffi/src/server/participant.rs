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

use roomkit::prelude::*;

use crate::{
    proto,
    server::{FfiHandle, FfiServer},
    FfiHandleId,
};

/// Context behind a participant handle.
/// Holds one owning reference to the participant, dropped when the handle is released.
#[derive(Clone)]
pub struct FfiParticipant {
    pub handle: FfiHandleId,
    pub participant: Participant,
}

impl FfiHandle for FfiParticipant {}

impl FfiParticipant {
    /// Hand a participant to the foreign language, the returned handle shares ownership
    pub fn store(server: &FfiServer, participant: Participant) -> FfiHandleId {
        let handle = server.next_id();
        log::debug!("new participant handle {} for {:?}", handle, participant);
        server.store_handle(handle, FfiParticipant { handle, participant });
        handle
    }

    pub fn identity(&self) -> String {
        self.participant.identity().into()
    }

    pub fn sid(&self) -> String {
        self.participant.sid().into()
    }

    pub fn is_connected(&self) -> bool {
        self.participant.is_connected()
    }

    pub fn info(&self) -> proto::ParticipantInfo {
        let state = self.participant.connection_state();
        proto::ParticipantInfo {
            handle: self.handle,
            sid: self.sid(),
            identity: self.identity(),
            name: self.participant.name(),
            state: proto::ConnectionState::from(state).into(),
            is_connected: state == ConnectionState::Connected,
        }
    }
}
