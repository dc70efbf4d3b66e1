// Path: crates/types/src/notification.rs
//! Main-chain application logs, executions, and notification events.

use serde::{Deserialize, Serialize};

/// A typed NEO VM stack item, as carried in a notification's `items` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackItem {
    /// A signed integer, carried as its minimal big-endian byte encoding
    /// together with its sign (NEO integers are arbitrary precision).
    Integer(i128),
    /// An opaque byte array (addresses, hashes, compressed public keys, ...).
    ByteArray(Vec<u8>),
    /// A nested, heterogeneous array of stack items.
    Array(Vec<StackItem>),
}

impl StackItem {
    /// Returns the inner bytes if this item is a [`StackItem::ByteArray`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            StackItem::ByteArray(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the inner integer if this item is a [`StackItem::Integer`].
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            StackItem::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the inner array if this item is a [`StackItem::Array`].
    pub fn as_array(&self) -> Option<&[StackItem]> {
        match self {
            StackItem::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// The VM trigger under which an execution ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// A contract invocation triggered by an application (transaction).
    Application,
    /// A witness-verification trigger. Never inspected by the decoder.
    Verification,
}

/// The terminal VM state of an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VmState {
    /// Execution completed successfully.
    Halt,
    /// Execution faulted.
    Fault,
}

/// One notification event raised during an execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// The 20-byte script hash of the contract that raised the event.
    pub script_hash: [u8; 20],
    /// The event name, e.g. `"OnDeposited"`.
    pub name: String,
    /// The heterogeneous, ordered argument tuple.
    pub items: Vec<StackItem>,
}

/// One VM execution within an application log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// The trigger under which this execution ran.
    pub trigger: Trigger,
    /// The terminal VM state.
    pub vm_state: VmState,
    /// Notification events raised during this execution, in order.
    pub notifications: Vec<NotificationEvent>,
}

impl Execution {
    /// Whether this execution should be inspected by the decoder: only
    /// `Application` executions that terminated in `Halt` are.
    pub fn is_inspectable(&self) -> bool {
        matches!(self.trigger, Trigger::Application) && matches!(self.vm_state, VmState::Halt)
    }
}

/// The application log for a single source transaction: zero or more executions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationLog {
    /// The transaction id this log belongs to.
    pub tx_id: [u8; 32],
    /// Executions recorded for this transaction.
    pub executions: Vec<Execution>,
}

impl ApplicationLog {
    /// Iterates the notifications of every inspectable execution, in order.
    pub fn inspectable_notifications(&self) -> impl Iterator<Item = &NotificationEvent> {
        self.executions
            .iter()
            .filter(|e| e.is_inspectable())
            .flat_map(|e| e.notifications.iter())
    }
}
