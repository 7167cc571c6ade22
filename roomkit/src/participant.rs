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

use std::fmt::Debug;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::id::{ParticipantIdentity, ParticipantSid};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

struct ParticipantInfo {
    sid: ParticipantSid,
    identity: ParticipantIdentity,
    name: String,
    state: ConnectionState,
}

struct ParticipantInner {
    info: RwLock<ParticipantInfo>,
}

/// A participant of a room.
///
/// Cloning a `Participant` is cheap and shares the underlying state: every
/// clone is an owner, and the state is freed once the last clone is dropped.
#[derive(Clone)]
pub struct Participant {
    inner: Arc<ParticipantInner>,
}

/// Non-owning reference to a [`Participant`]
#[derive(Clone)]
pub struct WeakParticipant {
    inner: Weak<ParticipantInner>,
}

impl Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("sid", &self.sid())
            .field("identity", &self.identity())
            .field("state", &self.connection_state())
            .finish()
    }
}

impl Participant {
    pub fn new(sid: ParticipantSid, identity: ParticipantIdentity, name: String) -> Self {
        Self {
            inner: Arc::new(ParticipantInner {
                info: RwLock::new(ParticipantInfo {
                    sid,
                    identity,
                    name,
                    state: ConnectionState::Connecting,
                }),
            }),
        }
    }

    pub fn sid(&self) -> ParticipantSid {
        self.inner.info.read().sid.clone()
    }

    pub fn identity(&self) -> ParticipantIdentity {
        self.inner.info.read().identity.clone()
    }

    pub fn name(&self) -> String {
        self.inner.info.read().name.clone()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.inner.info.read().state
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    /// The sid is only known once the server acknowledged the join
    pub fn set_sid(&self, sid: ParticipantSid) {
        self.inner.info.write().sid = sid;
    }

    pub fn set_name(&self, name: String) {
        self.inner.info.write().name = name;
    }

    /// Readers only ever see a snapshot, there is no change notification
    pub fn set_connection_state(&self, state: ConnectionState) {
        let old_state = std::mem::replace(&mut self.inner.info.write().state, state);
        if old_state == state {
            return;
        }

        log::debug!(
            "participant {} connection state changed: {:?} -> {:?}",
            self.identity(),
            old_state,
            state
        );
    }

    pub fn downgrade(&self) -> WeakParticipant {
        WeakParticipant { inner: Arc::downgrade(&self.inner) }
    }

    /// Number of owners currently sharing this participant
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    pub fn ptr_eq(&self, other: &Participant) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl WeakParticipant {
    pub fn upgrade(&self) -> Option<Participant> {
        self.inner.upgrade().map(|inner| Participant { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
