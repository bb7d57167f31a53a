//! One-shot readiness signal.
//!
//! A collaborator that finishes asynchronous setup (the Sheets API client)
//! resolves the signal once; everything that depends on it awaits
//! [`ReadySignal::wait`] instead of polling a global.

use std::cell::RefCell;

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};

pub struct ReadySignal {
    sender: RefCell<Option<oneshot::Sender<()>>>,
    ready: Shared<oneshot::Receiver<()>>,
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadySignal {
    pub fn new() -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            sender: RefCell::new(Some(tx)),
            ready: rx.shared(),
        }
    }

    /// Resolve the signal. Returns false when it was already resolved.
    pub fn resolve(&self) -> bool {
        match self.sender.borrow_mut().take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.sender.borrow().is_none()
    }

    /// Completes once [`resolve`](Self::resolve) ran. Returns false if the
    /// signal was dropped without ever resolving.
    pub fn wait(&self) -> impl std::future::Future<Output = bool> {
        self.ready.clone().map(|r| r.is_ok())
    }
}
