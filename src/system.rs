//! # System control and chip management API
//!
//! This module provides the general APIs to boot and configure the chip:
//! power-up sequencing, property writes, interrupt status and explicit
//! state changes.
//!
//! ## Available Methods
//!
//! ### Boot and Information
//! - [`power_up`](Si4464::power_up) - Boot the chip after a reset
//! - [`get_part_info`](Si4464::get_part_info) - Read part number and revision
//! - [`get_rev`](Si4464::get_rev) - Read the hardware revision word
//!
//! ### Configuration
//! - [`set_property`](Si4464::set_property) - Write one configuration property
//! - [`set_tx_power`](Si4464::set_tx_power) - Set the PA output power level
//!
//! ### Status and State
//! - [`get_int_status`](Si4464::get_int_status) - Read and clear the latched interrupt flags
//! - [`change_state`](Si4464::change_state) - Request an explicit device state change

use embassy_time::{Duration, Timer};
use embedded_hal::digital::v2::OutputPin;
use embedded_hal_async::spi::SpiBus;

use crate::constants::{POWER_UP_BOOT_MS, PROP_PA_PWR_LVL, TX_POWER_MAX, XO_FREQ_HZ};
use crate::status::IntStatus;

pub use super::cmd::cmd_system::*;

use super::{Si4464, Si4464Error};

impl<O, SPI> Si4464<O, SPI>
where
    O: OutputPin,
    SPI: SpiBus<u8>,
{
    /// Boot the chip. This must be the first command after
    /// [`reset`](Si4464::reset): every other operation is undefined on an
    /// un-booted chip. Waits the chip boot delay before returning.
    pub async fn power_up(&mut self) -> Result<(), Si4464Error> {
        let req = power_up_cmd(XO_FREQ_HZ);
        self.send(&req).await?;
        Timer::after_millis(POWER_UP_BOOT_MS).await;
        self.wait_cts(Duration::from_millis(100)).await
    }

    /// Read part number, revision and ROM identification
    pub async fn get_part_info(&mut self) -> Result<PartInfoRsp, Si4464Error> {
        let req = part_info_req();
        let mut rsp = PartInfoRsp::new();
        self.cmd_rd(&req, rsp.as_mut()).await?;
        Ok(rsp)
    }

    /// Read the hardware revision word (die mask revision and ROM id)
    pub async fn get_rev(&mut self) -> Result<u16, Si4464Error> {
        let rsp = self.get_part_info().await?;
        Ok(rsp.rev())
    }

    /// Write one configuration property.
    /// Idempotent: re-writing the same (key, value) pair only costs the bus
    /// traffic of the identical frame.
    pub async fn set_property(&mut self, prop: u32, value: u32) -> Result<(), Si4464Error> {
        let req = set_property_cmd(prop, value);
        self.send(&req).await
    }

    /// Read the latched interrupt status, clearing every pending flag.
    /// The returned snapshot must be captured once: a second read will show
    /// the flags cleared by this one.
    pub async fn get_int_status(&mut self) -> Result<IntStatus, Si4464Error> {
        let req = get_int_status_req(0, 0);
        let mut rsp = IntStatusRsp::new();
        self.cmd_rd(&req, rsp.as_mut()).await?;
        Ok(rsp.flags())
    }

    /// Set the PA output power level.
    /// Values above [`TX_POWER_MAX`] are rejected before any bus traffic;
    /// [`TX_POWER_DEFAULT`](crate::constants::TX_POWER_DEFAULT) is the
    /// vendor nominal level.
    pub async fn set_tx_power(&mut self, pwr: u16) -> Result<(), Si4464Error> {
        if pwr > TX_POWER_MAX {
            return Err(Si4464Error::InvalidArg);
        }
        self.set_property(PROP_PA_PWR_LVL, pwr as u32).await
    }

    /// Request an explicit device state change
    pub async fn change_state(&mut self, state: DeviceState) -> Result<(), Si4464Error> {
        let req = change_state_cmd(state);
        self.send(&req).await
    }
}
