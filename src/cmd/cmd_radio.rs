// Radio commands API and synthesizer parameter computation

use crate::constants::XO_FREQ_HZ;

use super::{OPC_CHANGE_STATE, OPC_START_TX};

use super::cmd_system::DeviceState;

/// Synthesizer programming realizing one RF frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SynthParams {
    /// Band selector for MODEM_CLKGEN_BAND
    pub band: u8,
    /// Output divider matching the band
    pub outdiv: u8,
    /// Integer part of the feedback divider
    pub inte: u8,
    /// Fractional part of the feedback divider, 20 bits with the MSB always set
    pub frac: u32,
}

/// Compute the synthesizer parameters for a frequency in Hz.
/// Returns None outside the 118-1050 MHz synthesizer range.
///
/// The phase detector runs at `2*xo/outdiv` and the feedback divider is
/// `inte + frac/2^19` with the integer part lowered by one so the
/// fractional part stays in `[2^19, 2^20)`.
pub fn synth_params(freq_hz: u32) -> Option<SynthParams> {
    let (outdiv, band): (u64, u8) = match freq_hz {
        705_000_000..=1_050_000_000 => (4, 0),
        470_000_000..705_000_000 => (6, 1),
        353_000_000..470_000_000 => (8, 2),
        235_000_000..353_000_000 => (12, 3),
        177_000_000..235_000_000 => (16, 4),
        118_000_000..177_000_000 => (24, 5),
        _ => return None,
    };
    let f_pfd = 2 * XO_FREQ_HZ as u64 / outdiv;
    let inte = freq_hz as u64 / f_pfd - 1;
    let rem = freq_hz as u64 - inte * f_pfd;
    let frac = (rem << 19) / f_pfd;
    Some(SynthParams {
        band,
        outdiv: outdiv as u8,
        inte: inte as u8,
        frac: frac as u32,
    })
}

/// Starts a transmission of `tx_len` bytes on the given channel.
/// The chip returns to the Ready state once the packet is sent
pub fn start_tx_cmd(channel: u8, tx_len: u16) -> [u8; 5] {
    let mut cmd = [0u8; 5];
    cmd[0] = OPC_START_TX;
    cmd[1] = channel;
    cmd[2] = (DeviceState::Ready as u8) << 4;

    cmd[3] |= ((tx_len >> 8) & 0xFF) as u8;
    cmd[4] |= (tx_len & 0xFF) as u8;
    cmd
}

/// Arms the TX frequency calibration by entering the TX tune state
pub fn tx_tune_cmd() -> [u8; 2] {
    [OPC_CHANGE_STATE, DeviceState::TxTune as u8]
}
