//! Driver tests against a scripted mock SPI bus.
//!
//! The mock records every bus transaction (one entry per NSS assertion),
//! always reports clear-to-send, replays queued response payloads for
//! READ_CMD_BUFF readouts, and can fail the next write of a given opcode.
//! Consuming the reply queue on read mirrors the chip's latched-flag
//! behaviour: a status value exists for exactly one read.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embassy_futures::block_on;
use embassy_time::Duration;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal_async::spi::{Error as SpiError, ErrorKind, ErrorType, SpiBus};

use si4464::cmd::{
    OPC_CHANGE_STATE, OPC_GET_INT_STATUS, OPC_PART_INFO, OPC_POWER_UP, OPC_READ_CMD_BUFF,
    OPC_SET_PROPERTY, OPC_START_TX,
};
use si4464::constants::{PROP_PA_PWR_LVL, TX_POWER_DEFAULT, TX_POWER_MAX};
use si4464::status::{INT_MASK_PACKET_SENT, INT_MASK_TX_TUNE};
use si4464::{Si4464, Si4464Error};

#[derive(Default)]
struct BusState {
    /// Every frame seen on the bus, as sent on MOSI
    frames: Vec<Vec<u8>>,
    /// Queued response payloads for READ_CMD_BUFF readouts
    replies: VecDeque<Vec<u8>>,
    /// Opcode whose next write fails with an SPI error
    fail_opcode: Option<u8>,
}

#[derive(Clone, Default)]
struct MockBus(Rc<RefCell<BusState>>);

impl MockBus {
    fn push_reply(&self, payload: &[u8]) {
        self.0.borrow_mut().replies.push_back(payload.to_vec());
    }

    fn fail_on(&self, opcode: u8) {
        self.0.borrow_mut().fail_opcode = Some(opcode);
    }

    fn frames_with(&self, opcode: u8) -> Vec<Vec<u8>> {
        self.0
            .borrow()
            .frames
            .iter()
            .filter(|f| f.first() == Some(&opcode))
            .cloned()
            .collect()
    }

    fn frame_count(&self) -> usize {
        self.0.borrow().frames.len()
    }
}

#[derive(Debug)]
struct MockSpiError;

impl SpiError for MockSpiError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for MockBus {
    type Error = MockSpiError;
}

impl SpiBus<u8> for MockBus {
    async fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    async fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        if state.fail_opcode.is_some() && state.fail_opcode == words.first().copied() {
            state.fail_opcode = None;
            return Err(MockSpiError);
        }
        state.frames.push(words.to_vec());
        Ok(())
    }

    async fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write).await
    }

    async fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        state.frames.push(words.to_vec());
        if words.first() == Some(&OPC_READ_CMD_BUFF) {
            // CTS is always ready; a transfer longer than the two-byte poll
            // is a response readout and consumes the next scripted payload
            words[1] = 0xFF;
            if words.len() > 2 {
                let payload = state.replies.pop_front().unwrap_or_default();
                for (dst, src) in words[2..].iter_mut().zip(payload.iter()) {
                    *dst = *src;
                }
            }
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

struct MockPin;

impl OutputPin for MockPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn radio(bus: &MockBus) -> Si4464<MockPin, MockBus> {
    Si4464::new(MockPin, bus.clone(), MockPin)
}

#[test]
fn set_property_frames_are_idempotent() {
    let bus = MockBus::default();
    let mut radio = radio(&bus);
    block_on(async {
        radio.set_property(PROP_PA_PWR_LVL, 115).await.unwrap();
        radio.set_property(PROP_PA_PWR_LVL, 115).await.unwrap();
    });
    let frames = bus.frames_with(OPC_SET_PROPERTY);
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0], frames[1]);
    assert_eq!(frames[0], vec![0x11, 0x22, 0x01, 0x00, 0x00, 0x00, 0x73]);
}

#[test]
fn tx_power_out_of_range_sends_nothing() {
    let bus = MockBus::default();
    let mut radio = radio(&bus);
    let res = block_on(radio.set_tx_power(TX_POWER_MAX + 1));
    assert!(matches!(res, Err(Si4464Error::InvalidArg)));
    assert_eq!(bus.frame_count(), 0);

    block_on(radio.set_tx_power(TX_POWER_DEFAULT)).unwrap();
    block_on(radio.set_tx_power(TX_POWER_MAX)).unwrap();
    assert_eq!(bus.frames_with(OPC_SET_PROPERTY).len(), 2);
}

#[test]
fn set_freq_out_of_range_sends_nothing() {
    let bus = MockBus::default();
    let mut radio = radio(&bus);
    let res = block_on(radio.set_freq(60_000_000));
    assert!(matches!(res, Err(Si4464Error::InvalidArg)));
    assert_eq!(bus.frame_count(), 0);
}

#[test]
fn tune_complete_on_third_read() {
    let bus = MockBus::default();
    let mut radio = radio(&bus);
    bus.push_reply(&[0x00, 0x00]);
    bus.push_reply(&[0x00, 0x00]);
    bus.push_reply(&INT_MASK_TX_TUNE.to_be_bytes());
    block_on(async {
        assert!(!radio.check_tx_tune().await.unwrap());
        assert!(!radio.check_tx_tune().await.unwrap());
        assert!(radio.check_tx_tune().await.unwrap());
    });
    // Exactly one status command per poll, no extra reads
    assert_eq!(bus.frames_with(OPC_GET_INT_STATUS).len(), 3);
}

#[test]
fn status_read_clears_latched_flags() {
    let bus = MockBus::default();
    let mut radio = radio(&bus);
    bus.push_reply(&(INT_MASK_TX_TUNE | INT_MASK_PACKET_SENT).to_be_bytes());
    bus.push_reply(&[0x00, 0x00]);
    block_on(async {
        let first = radio.get_int_status().await.unwrap();
        let second = radio.get_int_status().await.unwrap();
        // The first read consumed the latched flags: re-reading cannot confirm them
        assert!(first.tx_tune());
        assert!(first.packet_sent());
        assert!(second.none());
    });
}

#[test]
fn get_rev_reads_part_info() {
    let bus = MockBus::default();
    let mut radio = radio(&bus);
    bus.push_reply(&[0x22, 0x44, 0x64, 0x03, 0x0F, 0x11, 0x00, 0x06]);
    let rev = block_on(radio.get_rev()).unwrap();
    assert_eq!(rev, 0x2206);
    assert_eq!(bus.frames_with(OPC_PART_INFO)[0], vec![0x01]);
}

// Commands issued after a reset but before power_up still reach the bus:
// the power-up-first ordering is a documented caller contract, not a
// driver-enforced state machine, because the chip's behaviour on violation
// is itself undefined. This test pins that down rather than blessing it.
#[test]
fn ordering_is_a_caller_contract() {
    let bus = MockBus::default();
    let mut radio = radio(&bus);
    block_on(async {
        radio.reset().await.unwrap();
        radio.set_freq(915_000_000).await.unwrap();
    });
    assert_eq!(bus.frames_with(OPC_SET_PROPERTY).len(), 3);
    assert!(bus.frames_with(OPC_POWER_UP).is_empty());
}

#[test]
fn tune_then_send_scenario() {
    let bus = MockBus::default();
    let mut radio = radio(&bus);
    block_on(async {
        radio.reset().await.unwrap();
        radio.power_up().await.unwrap();
        radio.set_freq(915_000_000).await.unwrap();
        radio.start_tx_cal().await.unwrap();
        for _ in 0..3 {
            bus.push_reply(&[0x00, 0x00]);
        }
        bus.push_reply(&INT_MASK_TX_TUNE.to_be_bytes());
        assert!(
            radio
                .wait_tx_tune(50, Duration::from_micros(100))
                .await
                .unwrap()
        );
        radio
            .send(&[0x31, 0x00, 0x30, 0x00, 0x02, 0xAB, 0xCD])
            .await
            .unwrap();
    });

    assert_eq!(
        bus.frames_with(OPC_POWER_UP)[0],
        vec![0x02, 0x01, 0x00, 0x01, 0xC9, 0xC3, 0x80]
    );
    // 915 MHz: band 0 with SY_SEL, inte 60, frac 0x80000
    let props = bus.frames_with(OPC_SET_PROPERTY);
    assert_eq!(props[0], vec![0x11, 0x20, 0x51, 0x00, 0x00, 0x00, 0x08]);
    assert_eq!(props[1], vec![0x11, 0x40, 0x00, 0x00, 0x00, 0x00, 0x3C]);
    assert_eq!(props[2], vec![0x11, 0x40, 0x01, 0x00, 0x08, 0x00, 0x00]);
    assert_eq!(bus.frames_with(OPC_CHANGE_STATE)[0], vec![0x34, 0x05]);
    assert_eq!(bus.frames_with(OPC_GET_INT_STATUS).len(), 4);
    assert_eq!(
        bus.frames_with(OPC_START_TX)[0],
        vec![0x31, 0x00, 0x30, 0x00, 0x02, 0xAB, 0xCD]
    );

    // A transport failure on the TX frame surfaces as an error and issues
    // nothing beyond the CTS poll preceding the failed write
    let before = bus.frame_count();
    bus.fail_on(OPC_START_TX);
    let res = block_on(radio.send(&[0x31, 0x00, 0x30, 0x00, 0x01, 0x55]));
    assert!(matches!(res, Err(Si4464Error::Spi)));
    assert_eq!(bus.frame_count(), before + 1);
}
