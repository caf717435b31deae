//! Binary score file format (big-endian throughout).
//!
//! ```text
//! i32 2437, i64 393249234                   header
//! per difficulty (Easy, Medium, Hard, Master):
//!   repeated: u8 1, record                  another entry follows
//!   u8 0                                    end of this difficulty
//! record:
//!   i64 name hash
//!   16 x u16 name (UTF-16, zero padded)
//!   i64 checksum A, i64 checksum B
//!   i32 score
//! ```

use crate::checksum::{code_a, code_b, name_code, verify};
use crate::error::LedgerError;
use crate::ledger::{ScoreEntry, ScoreLedger};
use crate::types::{Difficulty, MAX_NAME_LENGTH};

const MAGIC_INT: i32 = 2437;
const MAGIC_LONG: i64 = 393_249_234;
const NAME_FIELD_UNITS: usize = MAX_NAME_LENGTH + 1;
const HEADER_LEN: usize = 4 + 8;

pub(crate) fn encode(ledger: &ScoreLedger) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + 4 * (1 + 5 * 61));
    out.extend_from_slice(&MAGIC_INT.to_be_bytes());
    out.extend_from_slice(&MAGIC_LONG.to_be_bytes());

    for difficulty in Difficulty::ALL {
        for entry in ledger.entries(difficulty) {
            let units: Vec<u16> = entry.name.encode_utf16().take(MAX_NAME_LENGTH).collect();
            out.push(1);
            out.extend_from_slice(&name_code(&units).to_be_bytes());
            for i in 0..NAME_FIELD_UNITS {
                let unit = units.get(i).copied().unwrap_or(0);
                out.extend_from_slice(&unit.to_be_bytes());
            }
            out.extend_from_slice(&code_a(entry.score).to_be_bytes());
            out.extend_from_slice(&code_b(entry.score).to_be_bytes());
            out.extend_from_slice(&entry.score.to_be_bytes());
        }
        out.push(0);
    }
    out
}

pub(crate) fn decode(bytes: &[u8]) -> Result<ScoreLedger, LedgerError> {
    let mut ledger = ScoreLedger::new();
    // A zero-length file is a fresh table, not a damaged one.
    if bytes.is_empty() {
        return Ok(ledger);
    }

    let mut r = Reader::new(bytes);
    let header = (r.i32(), r.i64());
    match header {
        (Some(MAGIC_INT), Some(MAGIC_LONG)) => {}
        (Some(_), Some(_)) => return Err(corrupt("bad header", ledger)),
        _ => return Err(corrupt("truncated header", ledger)),
    }

    let mut dropped = 0usize;
    for difficulty in Difficulty::ALL {
        loop {
            let Some(flag) = r.u8() else {
                return Err(corrupt("missing end-of-list marker", ledger));
            };
            if flag == 0 {
                break;
            }
            let Some(record) = read_record(&mut r) else {
                return Err(corrupt("truncated score record", ledger));
            };
            if verify(record.score, record.code_a, record.code_b) {
                ledger.push_loaded(difficulty, ScoreEntry::new(&record.name, record.score));
            } else {
                dropped += 1;
                log::debug!(
                    "dropping {:?} score {} for {:?}: checksum mismatch",
                    record.name,
                    record.score,
                    difficulty
                );
            }
        }
    }
    if dropped > 0 {
        log::warn!("discarded {} tampered score record(s)", dropped);
    }
    Ok(ledger)
}

fn corrupt(reason: &'static str, partial: ScoreLedger) -> LedgerError {
    log::warn!("score file corrupt: {}", reason);
    LedgerError::Corrupt {
        reason,
        partial: Box::new(partial),
    }
}

struct RawRecord {
    name: String,
    code_a: i64,
    code_b: i64,
    score: i32,
}

fn read_record(r: &mut Reader<'_>) -> Option<RawRecord> {
    let _name_hash = r.i64()?;
    let mut units = [0u16; NAME_FIELD_UNITS];
    for unit in units.iter_mut() {
        *unit = r.u16()?;
    }
    let len = units.iter().position(|u| *u == 0).unwrap_or(NAME_FIELD_UNITS);
    Some(RawRecord {
        name: String::from_utf16_lossy(&units[..len]),
        code_a: r.i64()?,
        code_b: r.i64()?,
        score: r.i32()?,
    })
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes: [u8; N] = self.buf.get(self.pos..end)?.try_into().ok()?;
        self.pos = end;
        Some(bytes)
    }

    fn u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn u16(&mut self) -> Option<u16> {
        self.take().map(u16::from_be_bytes)
    }

    fn i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_be_bytes)
    }

    fn i64(&mut self) -> Option<i64> {
        self.take().map(i64::from_be_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Offsets of the checksum fields inside the first record of a file.
    const FIRST_RECORD: usize = HEADER_LEN + 1;
    const CODE_A_OFFSET: usize = FIRST_RECORD + 8 + NAME_FIELD_UNITS * 2;
    const RECORD_LEN: usize = 8 + NAME_FIELD_UNITS * 2 + 8 + 8 + 4;

    fn sample() -> ScoreLedger {
        let mut ledger = ScoreLedger::new();
        ledger.insert(Difficulty::Easy, "alice", 48_000);
        ledger.insert(Difficulty::Easy, "bob", 47_500);
        ledger.insert(Difficulty::Easy, "carol", 40_000);
        ledger.insert(Difficulty::Master, "dave", 209_000);
        ledger
    }

    #[test]
    fn test_encode_layout() {
        let bytes = encode(&ScoreLedger::new());
        assert_eq!(&bytes[0..4], &2437i32.to_be_bytes());
        assert_eq!(&bytes[4..12], &393_249_234i64.to_be_bytes());
        assert_eq!(&bytes[12..], &[0, 0, 0, 0]);

        let bytes = encode(&sample());
        assert_eq!(bytes.len(), HEADER_LEN + 4 * (1 + RECORD_LEN) + 4);
        // Name field is UTF-16BE, zero padded.
        assert_eq!(&bytes[FIRST_RECORD + 8..FIRST_RECORD + 12], &[0, b'a', 0, b'l']);
    }

    #[test]
    fn test_decode_restores_encoded_table() {
        let ledger = sample();
        let decoded = decode(&encode(&ledger)).unwrap();
        assert_eq!(decoded, ledger);
    }

    #[test]
    fn test_flipped_checksum_drops_only_that_record() {
        let mut bytes = encode(&sample());
        bytes[CODE_A_OFFSET + 7] ^= 0x01;

        let decoded = decode(&bytes).unwrap();
        let names: Vec<&str> = decoded
            .entries(Difficulty::Easy)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["bob", "carol"]);
        assert_eq!(decoded.entries(Difficulty::Master).len(), 1);
    }

    #[test]
    fn test_bad_header_is_corrupt() {
        let mut bytes = encode(&sample());
        bytes[3] ^= 0xff;
        match decode(&bytes) {
            Err(LedgerError::Corrupt { reason, partial }) => {
                assert_eq!(reason, "bad header");
                assert!(partial.is_empty());
            }
            other => panic!("expected corrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_record_keeps_partial_table() {
        let bytes = encode(&sample());
        // Cut into the middle of the second Easy record.
        let cut = FIRST_RECORD + RECORD_LEN + 1 + 10;
        match decode(&bytes[..cut]) {
            Err(LedgerError::Corrupt { reason, partial }) => {
                assert_eq!(reason, "truncated score record");
                assert_eq!(partial.entries(Difficulty::Easy).len(), 1);
                assert_eq!(partial.entries(Difficulty::Easy)[0].name, "alice");
            }
            other => panic!("expected corrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_empty_table() {
        assert!(decode(&[]).unwrap().is_empty());
        assert!(matches!(
            decode(&[0, 0, 9]),
            Err(LedgerError::Corrupt { reason: "truncated header", .. })
        ));
    }

    #[test]
    fn test_fifteen_unit_name_survives() {
        let mut ledger = ScoreLedger::new();
        ledger.insert(Difficulty::Hard, "abcdefghijklmno", 1_000);
        let decoded = decode(&encode(&ledger)).unwrap();
        assert_eq!(decoded.entries(Difficulty::Hard)[0].name, "abcdefghijklmno");
    }
}
