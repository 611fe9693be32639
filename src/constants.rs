
/// Crystal reference frequency (Hz)
pub const XO_FREQ_HZ : u32 = 30_000_000;

/// Byte returned by READ_CMD_BUFF when the chip is clear-to-send
pub const CTS_READY : u8 = 0xFF;

/// Minimum SDN assertion for a full reset (ms)
pub const SDN_PULSE_MS : u64 = 1;
/// Power-on-reset settle time after SDN release (ms)
pub const POR_SETTLE_MS : u64 = 15;
/// Boot delay after POWER_UP before the first CTS poll (ms)
pub const POWER_UP_BOOT_MS : u64 = 15;

/// Property key for the clock generator band selection
pub const PROP_MODEM_CLKGEN_BAND : u32 = 0x2051;
/// Property key for the synthesizer integer divider
pub const PROP_FREQ_CONTROL_INTE : u32 = 0x4000;
/// Property key for the synthesizer fractional divider (20b)
pub const PROP_FREQ_CONTROL_FRAC : u32 = 0x4001;
/// Property key for the PA output power level
pub const PROP_PA_PWR_LVL : u32 = 0x2201;

/// SY_SEL bit in MODEM_CLKGEN_BAND, selects the fractional-N synthesizer
pub const SY_SEL : u32 = 0x08;

/// Highest legal PA power level
pub const TX_POWER_MAX : u16 = 0x7F;
/// Vendor nominal PA power level
pub const TX_POWER_DEFAULT : u16 = 115;
