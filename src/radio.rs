//! # Tuning and transmit API
//!
//! The transmit path is a fixed command sequence with one call per step:
//! [`set_freq`](Si4464::set_freq) programs the synthesizer,
//! [`start_tx_cal`](Si4464::start_tx_cal) arms the frequency-locked-loop
//! calibration, and [`check_tx_tune`](Si4464::check_tx_tune) polls for
//! lock, one status read per call. Calibration duration depends on the
//! frequency step, so the retry cadence and attempt bound belong to the
//! caller; [`wait_tx_tune`](Si4464::wait_tx_tune) is a bounded convenience
//! loop over the same single-read poll.
//!
//! ## Available Methods
//!
//! - [`set_freq`](Si4464::set_freq) - Program the synthesizer for a frequency
//! - [`start_tx_cal`](Si4464::start_tx_cal) - Arm the TX frequency calibration
//! - [`check_tx_tune`](Si4464::check_tx_tune) - One calibration-complete poll
//! - [`wait_tx_tune`](Si4464::wait_tx_tune) - Bounded calibration poll loop
//! - [`start_tx`](Si4464::start_tx) - Start a transmission

use embassy_time::{Duration, Timer};
use embedded_hal::digital::v2::OutputPin;
use embedded_hal_async::spi::SpiBus;

use crate::constants::{
    PROP_FREQ_CONTROL_FRAC, PROP_FREQ_CONTROL_INTE, PROP_MODEM_CLKGEN_BAND, SY_SEL,
};

pub use super::cmd::cmd_radio::*;

use super::{Si4464, Si4464Error};

impl<O, SPI> Si4464<O, SPI>
where
    O: OutputPin,
    SPI: SpiBus<u8>,
{
    /// Program the synthesizer for a frequency in Hz: band selection plus
    /// integer and fractional divider. Returns without waiting for lock,
    /// calibration is armed separately with [`start_tx_cal`](Si4464::start_tx_cal).
    /// Frequencies outside the synthesizer range are rejected before any
    /// bus traffic.
    pub async fn set_freq(&mut self, freq_hz: u32) -> Result<(), Si4464Error> {
        let params = synth_params(freq_hz).ok_or(Si4464Error::InvalidArg)?;
        self.set_property(PROP_MODEM_CLKGEN_BAND, SY_SEL | params.band as u32)
            .await?;
        self.set_property(PROP_FREQ_CONTROL_INTE, params.inte as u32)
            .await?;
        self.set_property(PROP_FREQ_CONTROL_FRAC, params.frac).await
    }

    /// Arm the TX frequency calibration by entering the TX tune state.
    /// Completion is signalled by the TX tune interrupt flag, polled with
    /// [`check_tx_tune`](Si4464::check_tx_tune).
    pub async fn start_tx_cal(&mut self) -> Result<(), Si4464Error> {
        let req = tx_tune_cmd();
        self.send(&req).await
    }

    /// One calibration poll: read the interrupt status and test the TX tune
    /// flag. `Ok(false)` means not tuned yet, a normal outcome while
    /// calibration runs, distinct from a transport error.
    pub async fn check_tx_tune(&mut self) -> Result<bool, Si4464Error> {
        let status = self.get_int_status().await?;
        Ok(status.tx_tune())
    }

    /// Poll for TX calibration completion: at most `max_polls` status reads
    /// spaced by `poll_interval`. Exhausting the bound returns `Ok(false)`,
    /// not an error, since calibration duration is chip and frequency
    /// dependent and timeout policy belongs to the caller.
    pub async fn wait_tx_tune(
        &mut self,
        max_polls: u32,
        poll_interval: Duration,
    ) -> Result<bool, Si4464Error> {
        for _ in 0..max_polls {
            if self.check_tx_tune().await? {
                return Ok(true);
            }
            Timer::after(poll_interval).await;
        }
        Ok(false)
    }

    /// Start transmission of `tx_len` bytes on the given channel.
    /// The chip must be tuned first; completion is signalled by the
    /// packet-sent interrupt flag.
    pub async fn start_tx(&mut self, channel: u8, tx_len: u16) -> Result<(), Si4464Error> {
        let req = start_tx_cmd(channel, tx_len);
        self.send(&req).await
    }
}
