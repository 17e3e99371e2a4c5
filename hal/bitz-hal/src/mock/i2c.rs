//! Mock I2C bus for testing

use std::vec::Vec;

use crate::i2c::I2cBus;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Read transaction
    Read { addr: u8, len: usize },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

/// Errors produced by the mock bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockI2cError {
    /// No device acknowledged the address
    Nack,
    /// Injected bus failure
    Bus,
}

/// Simulated quasi-bidirectional port expander (PCF8574 style)
///
/// Reads return the output latch ANDed with `read_mask`, which models
/// pins held low by whatever is attached to them.
#[derive(Debug, Clone)]
struct Expander {
    addr: u8,
    read_mask: u8,
    latch: u8,
}

/// Mock I2C implementation
///
/// Records all transactions for test verification. Only addresses with
/// an attached expander acknowledge; everything else NACKs.
#[derive(Debug, Default)]
pub struct MockI2c {
    devices: Vec<Expander>,
    transactions: Vec<I2cTransaction>,
    fail_writes: bool,
}

impl MockI2c {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an expander at `addr`
    ///
    /// Power-on latch state is all ones, as on the real part.
    pub fn attach(&mut self, addr: u8, read_mask: u8) {
        self.devices.push(Expander {
            addr,
            read_mask,
            latch: 0xFF,
        });
    }

    /// Make every subsequent write fail with [`MockI2cError::Bus`]
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<I2cTransaction> {
        self.transactions.clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Every byte written to `addr`, in order
    pub fn written_bytes(&self, addr: u8) -> Vec<u8> {
        self.transactions
            .iter()
            .filter_map(|t| match t {
                I2cTransaction::Write { addr: a, data } if *a == addr => Some(data.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Current output latch of the expander at `addr`
    pub fn latch(&self, addr: u8) -> Option<u8> {
        self.devices.iter().find(|d| d.addr == addr).map(|d| d.latch)
    }

    fn device(&mut self, addr: u8) -> Result<&mut Expander, MockI2cError> {
        self.devices
            .iter_mut()
            .find(|d| d.addr == addr)
            .ok_or(MockI2cError::Nack)
    }
}

impl I2cBus for MockI2c {
    type Error = MockI2cError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.transactions.push(I2cTransaction::Write {
            addr: address,
            data: data.to_vec(),
        });
        if self.fail_writes {
            return Err(MockI2cError::Bus);
        }
        let device = self.device(address)?;
        if let Some(&last) = data.last() {
            device.latch = last;
        }
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.transactions.push(I2cTransaction::Read {
            addr: address,
            len: buf.len(),
        });
        let device = self.device(address)?;
        let value = device.latch & device.read_mask;
        buf.fill(value);
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.transactions.push(I2cTransaction::WriteRead {
            addr: address,
            write_data: write_data.to_vec(),
            read_len: read_buf.len(),
        });
        let device = self.device(address)?;
        if let Some(&last) = write_data.last() {
            device.latch = last;
        }
        let value = device.latch & device.read_mask;
        read_buf.fill(value);
        Ok(())
    }
}
