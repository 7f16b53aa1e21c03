//! Async file reads
//!
//! Native builds read on a background thread and hand the result back over
//! a channel; the frame loop polls each frame. On WASM the read completes
//! immediately.

use super::{IngestError, SelectedFile};
use crate::store::SlotId;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{channel, Receiver, TryRecvError};
#[cfg(not(target_arch = "wasm32"))]
use std::thread;

/// Result type for async operations
pub type AsyncResult<T> = Result<T, IngestError>;

/// A handle to a pending async operation that can be polled
#[cfg(not(target_arch = "wasm32"))]
pub struct AsyncOp<T> {
    receiver: Receiver<AsyncResult<T>>,
    result: Option<AsyncResult<T>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl<T> AsyncOp<T> {
    fn from_receiver(receiver: Receiver<AsyncResult<T>>) -> Self {
        Self {
            receiver,
            result: None,
        }
    }

    /// Check if the operation has completed (polls the channel)
    pub fn is_complete(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }

        match self.receiver.try_recv() {
            Ok(result) => {
                self.result = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                // Reader thread died without sending
                self.result = Some(Err(IngestError::Io("read aborted".into())));
                true
            }
        }
    }

    /// Take the result if complete
    pub fn take(mut self) -> Option<AsyncResult<T>> {
        if self.result.is_none() {
            if let Ok(result) = self.receiver.try_recv() {
                self.result = Some(result);
            }
        }
        self.result
    }
}

#[cfg(target_arch = "wasm32")]
pub struct AsyncOp<T> {
    result: Option<AsyncResult<T>>,
}

#[cfg(target_arch = "wasm32")]
impl<T> AsyncOp<T> {
    pub fn is_complete(&mut self) -> bool {
        true
    }

    pub fn take(self) -> Option<AsyncResult<T>> {
        self.result
    }
}

/// A file read in flight, bound to the slot it will fill
pub struct PendingIngest {
    pub op: AsyncOp<String>,
    pub slot: SlotId,
    pub name: String,
}

impl PendingIngest {
    /// Poll once. Returns the finished result and drops the handle.
    pub fn poll(mut self) -> Result<(SlotId, String, AsyncResult<String>), Self> {
        if !self.op.is_complete() {
            return Err(self);
        }
        let slot = self.slot;
        let name = self.name;
        let result = self
            .op
            .take()
            .unwrap_or_else(|| Err(IngestError::Io("read aborted".into())));
        Ok((slot, name, result))
    }
}

/// Start reading `file` for `slot`. No file selected → nothing to do.
#[cfg(not(target_arch = "wasm32"))]
pub fn start_read(file: Option<&SelectedFile>, slot: SlotId) -> Option<PendingIngest> {
    let file = file?;
    let (sender, receiver) = channel();
    let path = file.path.clone();

    thread::spawn(move || {
        let result = super::read_data_url(&path);
        let _ = sender.send(result);
    });

    Some(PendingIngest {
        op: AsyncOp::from_receiver(receiver),
        slot,
        name: file.name.clone(),
    })
}

#[cfg(target_arch = "wasm32")]
pub fn start_read(file: Option<&SelectedFile>, slot: SlotId) -> Option<PendingIngest> {
    let file = file?;
    Some(PendingIngest {
        op: AsyncOp { result: Some(super::read_data_url(&file.path)) },
        slot,
        name: file.name.clone(),
    })
}
