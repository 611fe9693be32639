//! # Interrupt status
//!
//! GET_INT_STATUS returns a 16-bit latched bitfield: the low byte carries
//! packet-handler events, the high byte modem and chip events.
//!
//! The flags are cleared by the read itself (the command's clear masks are
//! zero), so a status value is a snapshot: capture the returned
//! [`IntStatus`] once and branch on it, a second read will show the
//! relevant bits unset.

/// RX FIFO fill above threshold
pub const INT_MASK_RX_FIFO_ALMOST_FULL  : u16 = 0x0001;
/// TX FIFO fill below threshold
pub const INT_MASK_TX_FIFO_ALMOST_EMPTY : u16 = 0x0002;
/// Received packet failed CRC
pub const INT_MASK_CRC_ERROR            : u16 = 0x0008;
/// Packet received
pub const INT_MASK_PACKET_RX            : u16 = 0x0010;
/// Packet transmission completed
pub const INT_MASK_PACKET_SENT          : u16 = 0x0020;

/// TX frequency calibration complete, synthesizer locked on the TX channel
pub const INT_MASK_TX_TUNE              : u16 = 0x0100;
/// RX frequency calibration complete
pub const INT_MASK_RX_TUNE              : u16 = 0x0200;
/// FIFO underflow or overflow
pub const INT_MASK_FIFO_ERROR           : u16 = 0x0400;
/// Last command failed or had an unknown opcode
pub const INT_MASK_CMD_ERROR            : u16 = 0x0800;
/// Chip ready to accept commands
pub const INT_MASK_CHIP_READY           : u16 = 0x2000;

/// Latched interrupt status snapshot
#[derive(Default, Clone, Copy)]
pub struct IntStatus(u16);

impl IntStatus {

    /// Create an interrupt status from a slice.
    /// Handle gracefully case where the slice is smaller than the two
    /// status bytes (missing bytes read as no flag raised)
    pub fn from_slice(bytes: &[u8]) -> IntStatus {
        let v = ((*bytes.first().unwrap_or(&0) as u16) << 8)
            | (*bytes.get(1).unwrap_or(&0) as u16);
        IntStatus(v)
    }

    /// Create a new interrupt status from a mask value
    /// Use INT_MASK_* constants to build it
    pub fn new(value: u16) -> IntStatus {
        IntStatus(value)
    }

    /// Return the interrupt status as u16
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Check the interrupt status against a mask
    pub fn intr_match(&self, mask: u16) -> bool {
        self.0 & mask != 0
    }

    pub fn none(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the RX FIFO threshold flag is raised
    pub fn rx_fifo_almost_full(&self) -> bool {
        (self.0 & INT_MASK_RX_FIFO_ALMOST_FULL) != 0
    }
    /// Returns true if the TX FIFO threshold flag is raised
    pub fn tx_fifo_almost_empty(&self) -> bool {
        (self.0 & INT_MASK_TX_FIFO_ALMOST_EMPTY) != 0
    }
    /// Returns true if a packet was received with a wrong CRC
    pub fn crc_error(&self) -> bool {
        (self.0 & INT_MASK_CRC_ERROR) != 0
    }
    /// Returns true if a packet was received
    pub fn packet_rx(&self) -> bool {
        (self.0 & INT_MASK_PACKET_RX) != 0
    }
    /// Returns true if a packet transmission completed
    pub fn packet_sent(&self) -> bool {
        (self.0 & INT_MASK_PACKET_SENT) != 0
    }
    /// Returns true if the TX frequency calibration completed
    pub fn tx_tune(&self) -> bool {
        (self.0 & INT_MASK_TX_TUNE) != 0
    }
    /// Returns true if the RX frequency calibration completed
    pub fn rx_tune(&self) -> bool {
        (self.0 & INT_MASK_RX_TUNE) != 0
    }
    /// Returns true if a FIFO underflow or overflow occurred
    pub fn fifo_error(&self) -> bool {
        (self.0 & INT_MASK_FIFO_ERROR) != 0
    }
    /// Returns true if the last command failed or was unknown
    pub fn cmd_error(&self) -> bool {
        (self.0 & INT_MASK_CMD_ERROR) != 0
    }
    /// Returns true if the chip reports ready for commands
    pub fn chip_ready(&self) -> bool {
        (self.0 & INT_MASK_CHIP_READY) != 0
    }
}

impl From<u16> for IntStatus {
    fn from(value: u16) -> Self {
        IntStatus::new(value)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IntStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "IntStatus: ");
        if self.none() {
            defmt::write!(f, "None");
            return;
        }
        if self.cmd_error()            {defmt::write!(f, "CmdError ")};
        if self.fifo_error()           {defmt::write!(f, "FifoError ")};
        if self.chip_ready()           {defmt::write!(f, "ChipReady ")};
        if self.tx_tune()              {defmt::write!(f, "TxTune ")};
        if self.rx_tune()              {defmt::write!(f, "RxTune ")};
        if self.packet_sent()          {defmt::write!(f, "PacketSent ")};
        if self.packet_rx()            {defmt::write!(f, "PacketRx ")};
        if self.crc_error()            {defmt::write!(f, "CrcError ")};
        if self.tx_fifo_almost_empty() {defmt::write!(f, "TxFifoAlmostEmpty ")};
        if self.rx_fifo_almost_full()  {defmt::write!(f, "RxFifoAlmostFull")};
    }
}
