/*!
    ordered batches of IC operations

    a sequence is submitted as a whole and executed strictly in submission
    order, optionally under the session lock so no foreign transaction can
    interleave. Execution stops at the first failing entry; the results
    gathered so far are returned with a trailing diagnostic instead of being
    discarded.
*/

use log::*;

use crate::{
    Error,
    channel::RegisterWindow,
    ic::Ic,
    lock::{LockSession, SessionGuard},
    };


/// one entry of a sequence
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// read the byte at the given remote register address
    Read {address: u32},
    /// write the low byte of `data` at the given remote register address
    Write {address: u32, data: u32},
}
impl Operation {
    /**
        parse one line of a textual sequence.

        `"<address>"` is a read, `"<address>,<data>"` a write; values are
        hexadecimal with a `0x` prefix or decimal. Anything else is refused
        with [Error::UnknownOperation].
    */
    pub fn parse(line: &str) -> Result<Self, Error> {
        let mut fields = line.trim().split(',').map(str::trim);
        let address = fields.next()
            .and_then(parse_value)
            .ok_or(Error::UnknownOperation)?;
        match fields.next() {
            None => Ok(Self::Read {address}),
            Some(field) => {
                let data = parse_value(field).ok_or(Error::UnknownOperation)?;
                if fields.next().is_some()
                    {return Err(Error::UnknownOperation)}
                Ok(Self::Write {address, data})
            },
        }
    }
}

/// outcome of one executed sequence entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// value read back
    Read(u32),
    /// echo of the submitted write value
    Write(u32),
    /// diagnostic for the entry that stopped the sequence
    Error(String),
}


impl<W: RegisterWindow, L: LockSession> Ic<W, L> {
    /**
        execute `ops` in submission order, stopping at the first failure.

        with `exclusive` the session lock is held over the whole batch and
        released on every exit path. A failed pre-flight channel check
        returns a single [Outcome::Error] without attempting any operation.
        In-sequence failures are converted into a trailing [Outcome::Error]
        carrying the full context, never into an `Err`: callers get whatever
        prefix of results completed.
    */
    pub fn execute_sequence(&self, ops: &[Operation], exclusive: bool) -> Vec<Outcome> {
        let _guard = exclusive.then(|| SessionGuard::acquire(&self.lock));

        // re-assert the channel inside the atomic part of the sequence
        if let Err(error) = self.ensure_selected() {
            return vec![Outcome::Error(error.to_string())]
        }

        let mut results = Vec::with_capacity(ops.len());
        for &op in ops {
            let result = match op {
                Operation::Read {address} => self.read(address).map(Outcome::Read),
                Operation::Write {address, data} => self.write(address, data).map(Outcome::Write),
            };
            match result {
                Ok(outcome) => results.push(outcome),
                Err(error) => {
                    results.push(Outcome::Error(self.diagnostic(op, &error)));
                    break
                },
            }
        }
        results
    }

    /**
        execute `ops` and render each result as one `0x…` line.

        a failing entry is logged and escalated as [Error::Sequence] carrying
        the lines rendered so far plus the diagnostic: partial success is
        surfaced as an error rather than silently swallowed.
    */
    pub fn write_sequence(&self, ops: &[Operation], exclusive: bool) -> Result<String, Error> {
        let mut buffer = String::new();
        for outcome in self.execute_sequence(ops, exclusive) {
            match outcome {
                Outcome::Read(value) | Outcome::Write(value) => {
                    buffer.push_str(&format_value(value));
                    buffer.push('\n');
                },
                Outcome::Error(message) => {
                    error!("{message}");
                    buffer.push_str(&message);
                    return Err(Error::Sequence(buffer))
                },
            }
        }
        Ok(buffer)
    }

    fn diagnostic(&self, op: Operation, error: &Error) -> String {
        let (address, data) = match op {
            Operation::Read {address} => (address, 0),
            Operation::Write {address, data} => (address, data),
        };
        let link = self.link();
        format!(
            "IC sequence address={:#x} data={:#x} serial={} link={} error='{}'",
            address, data,
            link.serial,
            link.link_id().map(i64::from).unwrap_or(-1),
            error,
        )
    }
}


/// render a result value the way [Ic::write_sequence] does
pub fn format_value(value: u32) -> String {
    format!("{value:#x}")
}

/// parse a `0x…` or decimal value, inverse of [format_value]
pub fn parse_value(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}
