//! Transaction structure
//!
//! Proof-of-stake layout: every transaction carries its own timestamp
//! right after the version field.

use serde::Serialize;

use super::encode::write_compact_size;
use super::Script;
use crate::crypto::{sha256d, Hash};

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutPoint {
    /// Transaction containing the output
    pub txid: Hash,
    /// Index of the output in that transaction
    pub vout: u32,
}

impl OutPoint {
    /// The outpoint a coinbase input spends
    pub const fn null() -> Self {
        Self {
            txid: Hash::zero(),
            vout: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

/// A transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    pub fn coinbase(script_sig: Script) -> Self {
        Self {
            prevout: OutPoint::null(),
            script_sig,
            sequence: u32::MAX,
        }
    }
}

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOut {
    /// Amount in base units
    pub value: i64,
    pub script_pubkey: Script,
}

impl TxOut {
    /// Zero value, empty script
    pub fn empty() -> Self {
        Self {
            value: 0,
            script_pubkey: Script::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

/// A complete transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub version: i32,
    /// Transaction timestamp (seconds since Unix epoch)
    pub time: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    /// Lock time (block height or timestamp)
    pub lock_time: u32,
}

impl Transaction {
    /// Create a coinbase transaction spending nothing
    pub fn coinbase(version: i32, time: u32, script_sig: Script, outputs: Vec<TxOut>) -> Self {
        Self {
            version,
            time,
            inputs: vec![TxIn::coinbase(script_sig)],
            outputs,
            lock_time: 0,
        }
    }

    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    /// Transaction id: double SHA-256 of the serialized transaction
    pub fn txid(&self) -> Hash {
        sha256d(&self.to_bytes())
    }

    /// Serialize in wire format
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.time.to_le_bytes());

        write_compact_size(&mut bytes, self.inputs.len() as u64);
        for input in &self.inputs {
            bytes.extend_from_slice(&input.prevout.txid.0);
            bytes.extend_from_slice(&input.prevout.vout.to_le_bytes());
            write_compact_size(&mut bytes, input.script_sig.len() as u64);
            bytes.extend_from_slice(input.script_sig.as_bytes());
            bytes.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut bytes, self.outputs.len() as u64);
        for output in &self.outputs {
            bytes.extend_from_slice(&output.value.to_le_bytes());
            write_compact_size(&mut bytes, output.script_pubkey.len() as u64);
            bytes.extend_from_slice(output.script_pubkey.as_bytes());
        }

        bytes.extend_from_slice(&self.lock_time.to_le_bytes());

        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coinbase() -> Transaction {
        let script = Script::new().push_int(0).push_num(7).push_slice(b"msg");
        Transaction::coinbase(1, 1_400_000_000, script, vec![TxOut::empty()])
    }

    #[test]
    fn test_coinbase_detection() {
        let tx = sample_coinbase();
        assert!(tx.is_coinbase());
        assert!(tx.outputs[0].is_empty());
    }

    #[test]
    fn test_serialized_layout() {
        let tx = sample_coinbase();
        let bytes = tx.to_bytes();
        // version, time, 1 input (36 + 1 + script + 4), 1 output (8 + 1), lock_time
        let script_len = tx.inputs[0].script_sig.len();
        assert_eq!(bytes.len(), 4 + 4 + 1 + 36 + 1 + script_len + 4 + 1 + 8 + 1 + 4);
        assert_eq!(&bytes[4..8], &1_400_000_000u32.to_le_bytes());
    }

    #[test]
    fn test_time_changes_txid() {
        let tx = sample_coinbase();
        let mut later = tx.clone();
        later.time += 1;
        assert_ne!(tx.txid(), later.txid());
    }
}
