//! Recording in-memory transport used by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{BusError, BusHandle, I2CTransport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Read { address: u8, reg: u8, len: usize },
    Write { address: u8, reg: u8, bytes: Vec<u8> },
}

#[derive(Debug, Default)]
struct State {
    present: HashSet<u8>,
    registers: HashMap<u8, Vec<u8>>,
    transactions: Vec<Transaction>,
    opens: usize,
    closes: usize,
    /// Handles still alive at the moment of each successful open.
    live_at_open: Vec<usize>,
    fail_transactions: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockBus {
    state: Arc<Mutex<State>>,
}

impl MockBus {
    /// A bus with one device answering at `address`.
    pub fn with_device(address: u8) -> Self {
        let bus = Self::default();
        bus.state().present.insert(address);
        bus
    }

    /// A bus where nothing acknowledges.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set_register(&self, reg: u8, bytes: &[u8]) {
        self.state().registers.insert(reg, bytes.to_vec());
    }

    pub fn fail_transactions(&self, fail: bool) {
        self.state().fail_transactions = fail;
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state().transactions.clone()
    }

    pub fn clear_transactions(&self) {
        self.state().transactions.clear();
    }

    pub fn opens(&self) -> usize {
        self.state().opens
    }

    pub fn closes(&self) -> usize {
        self.state().closes
    }

    pub fn live_at_open(&self) -> Vec<usize> {
        self.state().live_at_open.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

impl I2CTransport for MockBus {
    type Handle = MockHandle;

    fn open(&mut self, address: u8) -> Result<MockHandle, BusError> {
        let mut state = self.state();
        if !state.present.contains(&address) {
            return Err(BusError::Nack { address });
        }
        let live = state.opens - state.closes;
        state.live_at_open.push(live);
        state.opens += 1;
        Ok(MockHandle {
            address,
            state: Arc::clone(&self.state),
        })
    }
}

pub struct MockHandle {
    address: u8,
    state: Arc<Mutex<State>>,
}

impl BusHandle for MockHandle {
    fn read_bytes(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        let mut state = self.state.lock().unwrap();
        state.transactions.push(Transaction::Read {
            address: self.address,
            reg,
            len: buf.len(),
        });
        if state.fail_transactions {
            return Err(BusError::Nack { address: self.address });
        }
        buf.fill(0);
        if let Some(contents) = state.registers.get(&reg) {
            let n = contents.len().min(buf.len());
            buf[..n].copy_from_slice(&contents[..n]);
        }
        Ok(())
    }

    fn write_bytes(&mut self, reg: u8, bytes: &[u8]) -> Result<(), BusError> {
        let mut state = self.state.lock().unwrap();
        state.transactions.push(Transaction::Write {
            address: self.address,
            reg,
            bytes: bytes.to_vec(),
        });
        if state.fail_transactions {
            return Err(BusError::Nack { address: self.address });
        }
        state.registers.insert(reg, bytes.to_vec());
        Ok(())
    }
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.closes += 1;
        }
    }
}
