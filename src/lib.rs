#![cfg_attr(not(test), no_std)]

//! # Si4464 driver
//!
//! Async driver for the Si4464 sub-GHz transceiver, controlled through
//! single-byte opcode command frames over SPI with a dedicated chip select
//! (NSS) and a shutdown line (SDN).
//!
//! The chip signals readiness for a new command through the clear-to-send
//! (CTS) protocol: the host polls the READ_CMD_BUFF command until the first
//! reply byte reads 0xFF, and command responses follow the CTS byte in the
//! same transfer.
//!
//! Bringing the chip to a transmit-ready state is a fixed sequence, each
//! step a separate call so the caller can interleave other work:
//!  1. [`reset`](Si4464::reset) then [`power_up`](Si4464::power_up)
//!  2. [`set_freq`](Si4464::set_freq)
//!  3. [`start_tx_cal`](Si4464::start_tx_cal)
//!  4. poll [`check_tx_tune`](Si4464::check_tx_tune) (or the bounded
//!     [`wait_tx_tune`](Si4464::wait_tx_tune)) until the synthesizer locks
//!
//! The ordering is a caller contract: the chip's behaviour when a step is
//! skipped is undefined and the driver does not track it. Recovery from any
//! transport error is a full [`reset`](Si4464::reset).
//!
//! The driver owns the chip exclusively: all operations take `&mut self`,
//! one command frame is in flight at a time, and there is no internal
//! locking. Share across tasks by wrapping the whole device in a mutex.

pub mod status;
pub mod constants;
pub mod cmd;
pub mod system;
pub mod radio;

use embassy_time::{Duration, Instant, Timer};
use embedded_hal::digital::v2::OutputPin;
use embedded_hal_async::spi::SpiBus;

use cmd::OPC_READ_CMD_BUFF;
use constants::{CTS_READY, POR_SETTLE_MS, SDN_PULSE_MS};

/// Size of the response buffer, set to the largest reply (PART_INFO)
const BUFFER_SIZE: usize = 8;

/// Si4464 Device
pub struct Si4464<O, SPI> {
    /// Shutdown pin (active high), pulsed for a full hardware reset
    sdn: O,
    /// SPI device
    spi: SPI,
    /// NSS output pin
    nss: O,
    /// Buffer for the READ_CMD_BUFF transfer: opcode, CTS byte, response bytes
    buffer: [u8; BUFFER_SIZE + 2],
}

/// Error using the Si4464
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Si4464Error {
    /// Unable to Set/Get a pin level
    Pin,
    /// Unable to use SPI
    Spi,
    /// Timeout while waiting for clear-to-send
    CtsTimeout,
    /// Response larger than the internal buffer (>8B)
    InvalidSize,
    /// Argument outside the chip legal range, nothing was sent
    InvalidArg,
}

impl<O, SPI> Si4464<O, SPI>
where
    O: OutputPin,
    SPI: SpiBus<u8>,
{
    /// Create a Si4464 device from its shutdown pin, SPI bus and chip select.
    /// Construction performs no bus traffic: the first interaction with the
    /// chip is [`reset`](Si4464::reset) followed by [`power_up`](Si4464::power_up).
    pub fn new(sdn: O, spi: SPI, nss: O) -> Self {
        Self {
            sdn,
            spi,
            nss,
            buffer: [0; BUFFER_SIZE + 2],
        }
    }

    /// Reset the chip: pulse SDN and let the power-on-reset settle.
    /// All property and tuning state is lost, the chip must be booted again
    /// with [`power_up`](Si4464::power_up) before any other command.
    pub async fn reset(&mut self) -> Result<(), Si4464Error> {
        self.sdn.set_high().map_err(|_| Si4464Error::Pin)?;
        Timer::after_millis(SDN_PULSE_MS).await;
        self.sdn.set_low().map_err(|_| Si4464Error::Pin)?;
        Timer::after_millis(POR_SETTLE_MS).await;
        Ok(())
    }

    /// Poll READ_CMD_BUFF once, true when the chip reports clear-to-send
    async fn poll_cts(&mut self) -> Result<bool, Si4464Error> {
        self.nss.set_low().map_err(|_| Si4464Error::Pin)?;
        let mut frame = [OPC_READ_CMD_BUFF, 0x00];
        self.spi
            .transfer_in_place(&mut frame)
            .await
            .map_err(|_| Si4464Error::Spi)?;
        self.nss.set_high().map_err(|_| Si4464Error::Pin)?;
        Ok(frame[1] == CTS_READY)
    }

    /// Wait for the chip to be ready for a command, i.e. CTS raised
    pub async fn wait_cts(&mut self, timeout: Duration) -> Result<(), Si4464Error> {
        let start = Instant::now();
        while !self.poll_cts().await? {
            if start.elapsed() >= timeout {
                return Err(Si4464Error::CtsTimeout);
            }
            Timer::after_micros(50).await;
        }
        Ok(())
    }

    /// Write a raw command frame, verbatim, under one NSS assertion.
    /// The frame length must match what the opcode in `data[0]` expects:
    /// this is the primitive every other operation builds on and it does
    /// not validate per-opcode lengths.
    pub async fn send(&mut self, data: &[u8]) -> Result<(), Si4464Error> {
        self.wait_cts(Duration::from_millis(100)).await?;
        self.nss.set_low().map_err(|_| Si4464Error::Pin)?;
        self.spi.write(data).await.map_err(|_| Si4464Error::Spi)?;
        self.nss.set_high().map_err(|_| Si4464Error::Pin)
    }

    /// Write a command and read its response once the chip raises CTS.
    /// Rsp must be n bytes where n is the number of expected bytes.
    pub async fn cmd_rd(&mut self, req: &[u8], rsp: &mut [u8]) -> Result<(), Si4464Error> {
        if rsp.len() > BUFFER_SIZE {
            return Err(Si4464Error::InvalidSize);
        }
        self.send(req).await?;
        let start = Instant::now();
        loop {
            self.nss.set_low().map_err(|_| Si4464Error::Pin)?;
            let buf = &mut self.buffer[..rsp.len() + 2];
            buf.fill(0);
            buf[0] = OPC_READ_CMD_BUFF;
            self.spi
                .transfer_in_place(buf)
                .await
                .map_err(|_| Si4464Error::Spi)?;
            self.nss.set_high().map_err(|_| Si4464Error::Pin)?;
            if self.buffer[1] == CTS_READY {
                rsp.copy_from_slice(&self.buffer[2..rsp.len() + 2]);
                return Ok(());
            }
            if start.elapsed() >= Duration::from_millis(100) {
                return Err(Si4464Error::CtsTimeout);
            }
            Timer::after_micros(50).await;
        }
    }
}
