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

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Once};
use std::thread;
use std::time::Duration;

use dashmap::DashMap;
use downcast_rs::{impl_downcast, Downcast};
use parking_lot::{deadlock, Mutex};

use crate::{FfiError, FfiHandleId, FfiResult, INVALID_HANDLE};

pub mod participant;
pub mod requests;


pub struct FfiConfig {
    pub sdk: String,
    pub sdk_version: String,
}

/// To make sure we use the right types, only types that implement this trait
/// can be stored inside the FfiServer.
pub trait FfiHandle: Downcast + Send + Sync {}

impl_downcast!(FfiHandle);

/// Owned bytes handed to the foreign language, freed with drop_handle
#[derive(Clone)]
pub struct FfiDataBuffer {
    pub handle: FfiHandleId,
    pub data: Arc<Vec<u8>>,
}

impl FfiHandle for FfiDataBuffer {}

pub struct FfiServer {
    /// Store all Ffi handles inside an HashMap, ids are never reused so a released
    /// handle can't alias a newer object
    ffi_handles: DashMap<FfiHandleId, Box<dyn FfiHandle>>,

    next_id: AtomicU64,
    config: Mutex<Option<FfiConfig>>,
}

static DEADLOCK_DETECTOR: Once = Once::new();

impl Default for FfiServer {
    fn default() -> Self {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();

        // Create a background thread which checks for deadlocks every 10s
        DEADLOCK_DETECTOR.call_once(|| {
            thread::spawn(move || loop {
                thread::sleep(Duration::from_secs(10));
                let deadlocks = deadlock::check_deadlock();
                if deadlocks.is_empty() {
                    continue;
                }

                log::error!("{} deadlocks detected", deadlocks.len());
                for (i, threads) in deadlocks.iter().enumerate() {
                    log::error!("Deadlock #{}", i);
                    for t in threads {
                        log::error!("Thread Id {:#?}: \n{:#?}", t.thread_id(), t.backtrace());
                    }
                }
            });
        });

        Self {
            ffi_handles: Default::default(),
            next_id: AtomicU64::new(1), // 0 is invalid
            config: Default::default(),
        }
    }
}

impl FfiServer {
    pub fn setup(&self, config: FfiConfig) {
        log::info!("ffi server configured for {} v{}", config.sdk, config.sdk_version);
        *self.config.lock() = Some(config);
    }

    /// Name and version of the binding that configured the server
    pub fn sdk_info(&self) -> FfiResult<(String, String)> {
        self.config
            .lock()
            .as_ref()
            .map(|c| (c.sdk.clone(), c.sdk_version.clone()))
            .ok_or(FfiError::NotConfigured)
    }

    /// Drop every handle, participants still referenced elsewhere stay alive
    pub fn dispose(&self) {
        log::info!("disposing the FfiServer, dropping {} handles", self.ffi_handles.len());
        self.ffi_handles.clear();
        *self.config.lock() = None; // Invalidate the config
    }

    pub fn next_id(&self) -> FfiHandleId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn handle_count(&self) -> usize {
        self.ffi_handles.len()
    }

    pub fn store_handle<T>(&self, id: FfiHandleId, handle: T)
    where
        T: FfiHandle,
    {
        self.ffi_handles.insert(id, Box::new(handle));
    }

    /// Returns a clone of the stored value, the shard lock is only held while cloning
    pub fn retrieve_handle<T>(&self, id: FfiHandleId) -> FfiResult<T>
    where
        T: FfiHandle + Clone,
    {
        if id == INVALID_HANDLE {
            return Err(FfiError::InvalidHandle(id));
        }

        let handle = self.ffi_handles.get(&id).ok_or(FfiError::InvalidHandle(id))?;
        let handle = handle.downcast_ref::<T>().ok_or(FfiError::InvalidHandle(id))?;
        Ok(handle.clone())
    }

    /// Remove a handle from the table, only if it holds a T
    pub fn take_handle<T>(&self, id: FfiHandleId) -> FfiResult<T>
    where
        T: FfiHandle,
    {
        if id == INVALID_HANDLE {
            return Err(FfiError::InvalidHandle(id));
        }

        match self.ffi_handles.remove_if(&id, |_, handle| handle.is::<T>()) {
            Some((_, handle)) => match handle.downcast::<T>() {
                Ok(handle) => Ok(*handle),
                Err(_) => Err(FfiError::InvalidHandle(id)),
            },
            None if self.ffi_handles.contains_key(&id) => Err(FfiError::InvalidHandle(id)),
            None if self.was_minted(id) => Err(FfiError::DoubleRelease(id)),
            None => Err(FfiError::InvalidHandle(id)),
        }
    }

    pub fn drop_handle(&self, id: FfiHandleId) -> bool {
        self.ffi_handles.remove(&id).is_some()
    }

    fn was_minted(&self, id: FfiHandleId) -> bool {
        id != INVALID_HANDLE && id < self.next_id.load(Ordering::Relaxed)
    }
}
