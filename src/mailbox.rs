//! Portable latest-wins control mailbox for `no_std` environments.
//!
//! A single-slot cell built on `critical-section`. The control path only
//! ever cares about the newest intent, so posting replaces any unread value
//! instead of queueing behind it. Thread/interrupt safe via critical
//! sections.

use core::cell::RefCell;

use critical_section::Mutex;

/// A single-slot, thread-safe mailbox.
pub struct Mailbox<T> {
    inner: Mutex<RefCell<Option<T>>>,
}

impl<T> Mailbox<T> {
    /// Create an empty mailbox.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Get a sender handle for this mailbox.
    ///
    /// Multiple senders can coexist; the newest post wins.
    pub const fn sender(&self) -> MailboxSender<'_, T> {
        MailboxSender { mailbox: self }
    }

    /// Get a receiver handle for this mailbox.
    pub const fn receiver(&self) -> MailboxReceiver<'_, T> {
        MailboxReceiver { mailbox: self }
    }

    /// Post a value, returning the unread value it displaced, if any.
    pub fn post(&self, value: T) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().replace(value))
    }

    /// Take the pending value, if any.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().take())
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`Mailbox`].
///
/// This is a lightweight reference that can be cloned and passed around.
pub struct MailboxSender<'a, T> {
    mailbox: &'a Mailbox<T>,
}

impl<T> Clone for MailboxSender<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MailboxSender<'_, T> {}

impl<T> MailboxSender<'_, T> {
    /// Post a value, returning the unread value it displaced, if any.
    pub fn post(&self, value: T) -> Option<T> {
        self.mailbox.post(value)
    }
}

/// A receiver handle for a [`Mailbox`].
pub struct MailboxReceiver<'a, T> {
    mailbox: &'a Mailbox<T>,
}

impl<T> Clone for MailboxReceiver<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MailboxReceiver<'_, T> {}

impl<T> MailboxReceiver<'_, T> {
    /// Take the pending value, if any.
    pub fn take(&self) -> Option<T> {
        self.mailbox.take()
    }
}
