//! Shared serial console.
//!
//! The sensing loop prints a status line per counter event while the
//! operator console prompts, echoes and prints results on the same serial
//! sink. [`SharedConsole`] owns the writer behind a mutex; the only way to
//! write is through a [`ConsoleGuard`], and dropping the guard releases it.
//!
//! | Writer        | Acquire                   | On contention          |
//! |---------------|---------------------------|------------------------|
//! | sensing loop  | [`LockWait::NoWait`]      | status line is dropped |
//! | console UI    | [`LockWait::Forever`]     | waits (human paced)    |
//!
//! The sensing side never retries, so a blocking console acquire always
//! gets through between two status lines.

pub mod ui;

use core::fmt;
use core::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

/// How long [`SharedConsole::acquire`] may wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockWait {
    /// Fail immediately if another writer holds the console.
    NoWait,
    /// Block until the console is free.
    Forever,
}

/// The console was busy and the caller asked not to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockTimeout;

impl fmt::Display for LockTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "console busy")
    }
}

impl std::error::Error for LockTimeout {}

/// Serial sink shared by every writer in the system.
pub struct SharedConsole<W> {
    sink: Mutex<W>,
}

impl<W: std::io::Write> SharedConsole<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Take exclusive access to the sink.
    ///
    /// A poisoned lock is taken over: the writer holds no invariant a
    /// panicking writer could have broken.
    pub fn acquire(&self, wait: LockWait) -> Result<ConsoleGuard<'_, W>, LockTimeout> {
        let guard = match wait {
            LockWait::NoWait => match self.sink.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::WouldBlock) => return Err(LockTimeout),
                Err(TryLockError::Poisoned(p)) => p.into_inner(),
            },
            LockWait::Forever => self.sink.lock().unwrap_or_else(PoisonError::into_inner),
        };
        Ok(ConsoleGuard { guard })
    }

    /// Non-blocking acquire for the high-rate path.
    pub fn try_acquire(&self) -> Option<ConsoleGuard<'_, W>> {
        self.acquire(LockWait::NoWait).ok()
    }

    /// Silence every other writer until the returned guard is dropped.
    pub fn mute(&self) -> ConsoleGuard<'_, W> {
        let guard = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        ConsoleGuard { guard }
    }

    /// Give the sink back (tests, shutdown).
    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive handle on the console. Release by dropping.
pub struct ConsoleGuard<'a, W> {
    guard: MutexGuard<'a, W>,
}

impl<W> Deref for ConsoleGuard<'_, W> {
    type Target = W;

    fn deref(&self) -> &W {
        &self.guard
    }
}

impl<W> DerefMut for ConsoleGuard<'_, W> {
    fn deref_mut(&mut self) -> &mut W {
        &mut self.guard
    }
}
