// System commands API

use super::{OPC_CHANGE_STATE, OPC_GET_INT_STATUS, OPC_PART_INFO, OPC_POWER_UP, OPC_SET_PROPERTY};

/// Device state used by the CHANGE_STATE command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    Sleep = 1,
    SpiActive = 2,
    Ready = 3,
    TxTune = 5,
    RxTune = 6,
    Tx = 7,
    Rx = 8,
}

/// Boots the chip: normal boot, internal crystal, reference frequency in Hz
pub fn power_up_cmd(xo_freq: u32) -> [u8; 7] {
    let mut cmd = [0u8; 7];
    cmd[0] = OPC_POWER_UP;
    cmd[1] = 0x01; // Normal boot (no patch)
    cmd[2] = 0x00; // Internal crystal

    cmd[3] |= ((xo_freq >> 24) & 0xFF) as u8;
    cmd[4] |= ((xo_freq >> 16) & 0xFF) as u8;
    cmd[5] |= ((xo_freq >> 8) & 0xFF) as u8;
    cmd[6] |= (xo_freq & 0xFF) as u8;
    cmd
}

/// Gets the part number, hardware revision and ROM identification
pub fn part_info_req() -> [u8; 1] {
    [OPC_PART_INFO]
}

/// Writes one property: the 32-bit key carries the group in bits 15:8 and
/// the index in bits 7:0, the value is sent big-endian
pub fn set_property_cmd(prop: u32, value: u32) -> [u8; 7] {
    let mut cmd = [0u8; 7];
    cmd[0] = OPC_SET_PROPERTY;
    cmd[1] = ((prop >> 8) & 0xFF) as u8;
    cmd[2] = (prop & 0xFF) as u8;

    cmd[3] |= ((value >> 24) & 0xFF) as u8;
    cmd[4] |= ((value >> 16) & 0xFF) as u8;
    cmd[5] |= ((value >> 8) & 0xFF) as u8;
    cmd[6] |= (value & 0xFF) as u8;
    cmd
}

/// Reads the latched interrupt status. A zero bit in a clear mask clears the
/// corresponding pending flag, so (0,0) reads and clears everything
pub fn get_int_status_req(ph_clr: u8, modem_clr: u8) -> [u8; 3] {
    let mut cmd = [0u8; 3];
    cmd[0] = OPC_GET_INT_STATUS;
    cmd[1] = ph_clr;
    cmd[2] = modem_clr;
    cmd
}

/// Requests an explicit device state change
pub fn change_state_cmd(state: DeviceState) -> [u8; 2] {
    [OPC_CHANGE_STATE, state as u8]
}

// Response structs

/// Response for the PART_INFO command
#[derive(Default)]
pub struct PartInfoRsp([u8; 8]);

impl PartInfoRsp {
    /// Create a new response buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Mask revision of the die
    pub fn chiprev(&self) -> u8 {
        self.0[0]
    }

    /// Part number
    pub fn part(&self) -> u16 {
        ((self.0[1] as u16) << 8) | self.0[2] as u16
    }

    /// Part build number
    pub fn pbuild(&self) -> u8 {
        self.0[3]
    }

    /// Die identifier
    pub fn id(&self) -> u16 {
        ((self.0[4] as u16) << 8) | self.0[5] as u16
    }

    /// Customer identifier
    pub fn customer(&self) -> u8 {
        self.0[6]
    }

    /// ROM identifier
    pub fn romid(&self) -> u8 {
        self.0[7]
    }

    /// Hardware revision word: die mask revision and ROM identifier
    pub fn rev(&self) -> u16 {
        ((self.chiprev() as u16) << 8) | self.romid() as u16
    }
}

impl AsMut<[u8]> for PartInfoRsp {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// Response for the GET_INT_STATUS command
#[derive(Default)]
pub struct IntStatusRsp([u8; 2]);

impl IntStatusRsp {
    /// Create a new response buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Interrupt flags raised since the last clearing read
    pub fn flags(&self) -> crate::status::IntStatus {
        crate::status::IntStatus::from_slice(&self.0)
    }
}

impl AsMut<[u8]> for IntStatusRsp {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_up_frame() {
        let cmd = power_up_cmd(30_000_000);
        assert_eq!(cmd, [0x02, 0x01, 0x00, 0x01, 0xC9, 0xC3, 0x80]);
    }

    #[test]
    fn set_property_frame() {
        let cmd = set_property_cmd(0x2201, 115);
        assert_eq!(cmd, [0x11, 0x22, 0x01, 0x00, 0x00, 0x00, 0x73]);
    }

    #[test]
    fn set_property_encode_is_pure() {
        // Same (key, value) pair must always produce the same frame
        assert_eq!(set_property_cmd(0x4000, 60), set_property_cmd(0x4000, 60));
    }

    #[test]
    fn get_int_status_frame() {
        assert_eq!(get_int_status_req(0, 0), [0x20, 0x00, 0x00]);
        assert_eq!(get_int_status_req(0x20, 0x01), [0x20, 0x20, 0x01]);
    }

    #[test]
    fn change_state_frame() {
        assert_eq!(change_state_cmd(DeviceState::TxTune), [0x34, 0x05]);
        assert_eq!(change_state_cmd(DeviceState::Ready), [0x34, 0x03]);
    }

    #[test]
    fn part_info_decode() {
        let mut rsp = PartInfoRsp::new();
        rsp.as_mut()
            .copy_from_slice(&[0x22, 0x44, 0x64, 0x03, 0x0F, 0x11, 0x00, 0x06]);
        assert_eq!(rsp.chiprev(), 0x22);
        assert_eq!(rsp.part(), 0x4464);
        assert_eq!(rsp.pbuild(), 0x03);
        assert_eq!(rsp.id(), 0x0F11);
        assert_eq!(rsp.romid(), 0x06);
        assert_eq!(rsp.rev(), 0x2206);
    }
}
