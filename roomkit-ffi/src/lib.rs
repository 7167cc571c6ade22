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

use lazy_static::lazy_static;
use thiserror::Error;

mod cabi;
mod java;
pub mod proto;
pub mod server;

pub use cabi::*;
pub use server::participant::FfiParticipant;
pub use server::{FfiConfig, FfiServer};

pub type FfiHandleId = u64;

pub const INVALID_HANDLE: FfiHandleId = 0;

#[derive(Error, Debug)]
pub enum FfiError {
    #[error("the server is not configured")]
    NotConfigured,
    #[error("invalid handle: {0}")]
    InvalidHandle(FfiHandleId),
    #[error("handle {0} was already released")]
    DoubleRelease(FfiHandleId),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type FfiResult<T> = Result<T, FfiError>;

lazy_static! {
    pub static ref FFI_SERVER: FfiServer = FfiServer::default();
}
