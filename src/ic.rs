use std::{
    thread,
    time::Duration,
    };
use log::*;

use crate::{
    Error,
    channel::{Link, RegisterWindow, SerialId, MAX_LINKS_PER_DEVICE},
    lock::LockSession,
    registers::{self, Reg, Request, Status},
    };


/**
    settle time after a write poke sequence.

    the remote state machine exposes no completion interrupt; FIFO occupancy
    and readiness are sampled once after this fixed wait instead of being
    polled. Protocol constant, not tunable per call.
*/
pub const SETTLE_DELAY: Duration = Duration::from_millis(10);


/**
    IC session over one register window

    owns the window capability, the [Link] descriptor and the lock session,
    all torn down together. All methods address the link currently selected
    on the descriptor; selection is re-asserted before every transaction
    since other masters may move the shared window between calls.
*/
pub struct Ic<W, L> {
    window: W,
    pub(crate) lock: L,
    link: Link,
}

impl<W: RegisterWindow, L: LockSession> Ic<W, L> {
    /**
        open a session on `window` addressing logical link `link_id`.

        fails with [Error::LinkOutOfRange] before touching any register when
        the link id exceeds the device's link count. Otherwise synchronizes
        the remote clocks (reset pulse) and applies the default transfer
        configuration.
    */
    pub fn new(
        window: W,
        lock: L,
        session: impl Into<String>,
        serial: SerialId,
        link_id: Option<u16>,
    ) -> Result<Self, Error> {
        if let Some(id) = link_id {
            if id >= MAX_LINKS_PER_DEVICE
                {return Err(Error::LinkOutOfRange)}
        }

        let new = Self {
            window,
            lock,
            link: Link::new(session, serial, link_id),
            };
        debug!("opening IC session '{}' on {} link {:?}", new.link.session, serial, link_id);
        new.sc_reset();
        new.write_reg(registers::WR_CFG, registers::DEFAULT_CFG);
        Ok(new)
    }

    /// link descriptor of this session
    pub fn link(&self) -> &Link {&self.link}

    /// pulse the reset register to sync the remote clocks
    fn sc_reset(&self) {
        self.write_reg(registers::SC_RESET, 0x1);
        self.write_reg(registers::SC_RESET, 0x0);
    }

    /// switch the shared window to the given logical link
    pub fn set_channel(&mut self, link_id: u16) -> Result<(), Error> {
        if link_id >= MAX_LINKS_PER_DEVICE
            {return Err(Error::LinkOutOfRange)}
        self.link.select(link_id);
        self.write_reg(registers::SC_LINK, self.link.raw_id().into());
        Ok(())
    }

    /**
        make sure the shared window is addressing this session's link.

        the addressed channel belongs to the hardware, not to any one master:
        another actor may have moved it since the last call. On mismatch the
        select write is re-issued (at most one corrective write per call),
        otherwise this is read-only.
    */
    pub fn ensure_selected(&self) -> Result<(), Error> {
        if self.link.link_id().is_none()
            {return Err(Error::ChannelNotConfigured)}

        let channel = (self.read_reg(registers::SC_MONITOR) >> 8) & 0xff;
        if channel != u32::from(self.link.raw_id()) {
            debug!("IC channel drifted to {}, reselecting {}", channel, self.link.raw_id());
            self.write_reg(registers::SC_LINK, self.link.raw_id().into());
        }
        Ok(())
    }

    /**
        read the byte at `address` on the remote device.

        the address is masked to 16 bits before transmission. The status word
        carries empty/ready flags but the read path deliberately ignores
        them: the protocol gives no read-error signal, whatever came out of
        the FIFO is the result.
    */
    pub fn read(&self, address: u32) -> Result<u32, Error> {
        self.ensure_selected()?;

        let request = Request::new((address & 0xffff) as u16, 0);

        // push the request to the FIFO
        self.write_reg(registers::WR_DATA, request.into());
        self.pulse(registers::CMD_FIFO_WRITE);
        // run the read state machine, then pulse the read
        self.pulse(registers::CMD_EXEC_READ);
        self.pulse(registers::CMD_READ);

        let status = Status::from(self.read_reg(registers::RD_DATA));
        Ok(status.data().into())
    }

    /**
        write the low byte of `data` at `address` on the remote device.

        returns the caller's `data` verbatim as acknowledgment, regardless of
        the 8bit truncation on the wire. Completion is sampled once after
        [SETTLE_DELAY]: the write succeeded only if the FIFO is non-empty and
        the state machine reports ready, else [Error::TransactionFailed].
        Retrying is left to the caller.
    */
    pub fn write(&self, address: u32, data: u32) -> Result<u32, Error> {
        self.ensure_selected()?;

        let echo = data;
        let request = Request::new((address & 0xffff) as u16, (data & 0xff) as u8);

        // push the request to the FIFO
        self.write_reg(registers::WR_DATA, request.into());
        self.pulse(registers::CMD_FIFO_WRITE);
        // run the write state machine
        self.pulse(registers::CMD_EXEC_WRITE);

        thread::sleep(SETTLE_DELAY);

        let status = Status::from(self.read_reg(registers::RD_DATA));
        if status.empty() || ! status.ready()
            {return Err(Error::TransactionFailed)}
        Ok(echo)
    }

    /// raw write to the transfer configuration register
    pub fn set_config(&self, value: u32) {
        self.write_reg(registers::WR_CFG, value);
    }

    /// issue a command strobe, then clear it
    fn pulse(&self, command: u32) {
        self.write_reg(registers::WR_CMD, command);
        self.write_reg(registers::WR_CMD, 0x0);
    }

    fn write_reg(&self, reg: Reg, value: u32) {
        self.window.write_register(reg.index(), value);
    }
    fn read_reg(&self, reg: Reg) -> u32 {
        self.window.read_register(reg.index())
    }
}
