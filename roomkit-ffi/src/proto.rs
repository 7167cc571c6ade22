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

#![allow(clippy::derive_partial_eq_without_eq)]

/// Snapshot of a participant as seen through its handle
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ParticipantInfo {
    #[prost(uint64, tag = "1")]
    pub handle: u64,
    #[prost(string, tag = "2")]
    pub sid: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub identity: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub name: ::prost::alloc::string::String,
    #[prost(enumeration = "ConnectionState", tag = "5")]
    pub state: i32,
    #[prost(bool, tag = "6")]
    pub is_connected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ConnectionState {
    ConnConnecting = 0,
    ConnConnected = 1,
    ConnDisconnected = 2,
}

impl ConnectionState {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ConnectionState::ConnConnecting => "CONN_CONNECTING",
            ConnectionState::ConnConnected => "CONN_CONNECTED",
            ConnectionState::ConnDisconnected => "CONN_DISCONNECTED",
        }
    }
}

impl From<roomkit::ConnectionState> for ConnectionState {
    fn from(state: roomkit::ConnectionState) -> Self {
        match state {
            roomkit::ConnectionState::Connecting => Self::ConnConnecting,
            roomkit::ConnectionState::Connected => Self::ConnConnected,
            roomkit::ConnectionState::Disconnected => Self::ConnDisconnected,
        }
    }
}
