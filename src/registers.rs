/*!
    define the IC protocol register map and wire words

    locations are fixed protocol constants relative to [BASE]; they must match
    the remote firmware exactly. The wire words crossing the window are
    described as bitfields, see [Request] and [Status].
*/

use bilge::prelude::*;


/**
    a register is a fixed location in the register window.

    it only holds the byte address of the register, hence can be created,
    copied or destroyed at no cost. The window accessors are word oriented,
    use [Reg::index] when talking to a [crate::channel::RegisterWindow].
*/
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Reg {
    addr: u32,
}
impl Reg {
    /// register from its byte address
    pub const fn new(address: u32) -> Self {
        Self {addr: address}
    }
    /// byte address in the window
    pub const fn address(self) -> u32 {self.addr}
    /// 32bit word index used by the window accessors
    pub const fn index(self) -> u32 {self.addr / 4}
}


/// base byte address of the IC block in the window
pub const BASE: u32 = 0x00f0_0000;

/// FIFO data word to transmit
pub const WR_DATA: Reg = Reg::new(BASE + 0x20);
/// transfer configuration
pub const WR_CFG: Reg = Reg::new(BASE + 0x24);
/// command strobes, see the `CMD_*` constants
pub const WR_CMD: Reg = Reg::new(BASE + 0x28);
/// FIFO result/status word, see [Status]
pub const RD_DATA: Reg = Reg::new(BASE + 0x30);

// slow-control block, owned by the window provider but poked by this crate
// for reset, channel selection and channel monitoring
/// remote clock sync, written 1 then 0 at session start
pub const SC_RESET: Reg = Reg::new(BASE + 0x00);
/// raw link id currently addressed on the shared window
pub const SC_LINK: Reg = Reg::new(BASE + 0x04);
/// monitor word, bits[15:8] echo the currently addressed channel
pub const SC_MONITOR: Reg = Reg::new(BASE + 0x08);

/// strobe pushing [WR_DATA] into the FIFO
pub const CMD_FIFO_WRITE: u32 = 0x1;
/// strobe pulsing the read
pub const CMD_READ: u32 = 0x2;
/// strobe starting the write state machine
pub const CMD_EXEC_WRITE: u32 = 0x4;
/// strobe starting the read state machine
pub const CMD_EXEC_READ: u32 = 0x8;

/// configuration word applied to [WR_CFG] at session start
pub const DEFAULT_CFG: u32 = 0x3;


/// FIFO request word pushed to [WR_DATA]
#[bitsize(32)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq, Default)]
pub struct Request {
    /// register address on the remote device
    pub address: u16,
    /// byte to write, left zero for a read request
    pub data: u8,
    reserved: u8,
}

/// FIFO status word read back from [RD_DATA]
#[bitsize(32)]
#[derive(Copy, Clone, FromBits, DebugBits, PartialEq, Default)]
pub struct Status {
    /// byte read back from the remote device
    pub data: u8,
    /// echo of the addressed sub-address
    pub address: u8,
    /// the FIFO drained without producing a result
    pub empty: bool,
    reserved: u14,
    /// the state machine completed its transfer
    pub ready: bool,
}
