/*!
    master side of the IC slow-control protocol

    The remote device is not directly addressable: every logical register
    access goes through a narrow window of command/status registers driving a
    write-FIFO and a state machine on the far side. This crate encodes logical
    `read(address)` / `write(address, data)` requests into the exact poke
    sequences that state machine expects, decodes its status word, and runs
    ordered batches of such operations under an optional cooperative lock.

    The central resource is the [ic::Ic] session, built over two injected
    capabilities:

    - a [channel::RegisterWindow] giving raw access to the register window
    - a [lock::LockSession] serializing sequences across concurrent masters

    one-shot accesses go through [ic::Ic::read] / [ic::Ic::write], batches
    through [ic::Ic::execute_sequence] and its textual twin
    [ic::Ic::write_sequence].
*/

pub mod registers;
pub mod channel;
pub mod lock;
pub mod ic;
pub mod sequence;

use thiserror::Error;

/// error regarding IC communication
#[derive(Error, Debug)]
pub enum Error {
    /// a transaction was attempted while no logical link is selected
    #[error("no IC channel selected")]
    ChannelNotConfigured,
    /// the remote state machine did not reach the ready/non-empty state after a write
    #[error("IC WRITE was unsuccessful")]
    TransactionFailed,
    /// a sequence entry could not be understood
    #[error("IC operation type unknown")]
    UnknownOperation,
    /// the requested link exceeds the device's link count
    #[error("maximum link number exceeded")]
    LinkOutOfRange,
    /// a textual sequence stopped on an error, carrying the output gathered so far
    #[error("{0}")]
    Sequence(String),
}
