//! # Command frame builders
//!
//! Pure encode/decode for the chip command set: each builder returns the
//! fixed-width byte frame for one command, response structs wrap the raw
//! reply bytes behind typed accessors. No I/O happens here, which keeps the
//! bit packing testable without a transport.

pub mod cmd_system;
pub mod cmd_radio;

/// No operation
pub const OPC_NOP            : u8 = 0x00;
/// Part number, revision and ROM identification
pub const OPC_PART_INFO      : u8 = 0x01;
/// Boot the chip after a reset
pub const OPC_POWER_UP       : u8 = 0x02;
/// Write one configuration property
pub const OPC_SET_PROPERTY   : u8 = 0x11;
/// Read and clear the latched interrupt status
pub const OPC_GET_INT_STATUS : u8 = 0x20;
/// Start a transmission
pub const OPC_START_TX       : u8 = 0x31;
/// Explicit device state change
pub const OPC_CHANGE_STATE   : u8 = 0x34;
/// CTS poll and response readout
pub const OPC_READ_CMD_BUFF  : u8 = 0x44;
