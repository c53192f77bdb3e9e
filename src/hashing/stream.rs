//! Seeded pseudo-random stream and its persisted text form
//!
//! The stream is the single source every table constant is drawn from.
//! ChaCha20 has a documented, value-stable output for a given seed, so a
//! stream generated today matches one generated on any other machine and
//! matches the persisted copy bit for bit.

use super::error::{Result, ZobristError};
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};

/// Seed used when nothing else is configured.
pub const DEFAULT_SEED: u64 = 2361912;

/// Piece/colour/square constants: 8 kinds x 2 colours x 64 squares.
pub const PIECE_VALUES: usize = 64 * 8 * 2;
pub const CASTLING_VALUES: usize = 16;
/// Slot 0 stands for "no en passant file".
pub const EN_PASSANT_VALUES: usize = 9;

/// Number of values a stream must provide to fill a table.
pub const REQUIRED_VALUES: usize = PIECE_VALUES + CASTLING_VALUES + EN_PASSANT_VALUES + 1;

/// An ordered, consumable sequence of 64-bit values
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomStream {
    values: Vec<u64>,
    cursor: usize,
}

impl RandomStream {
    /// Generate the full stream for `seed`
    pub fn generate(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::from_seed(seed_bytes(seed));
        let values = (0..REQUIRED_VALUES).map(|_| rng.next_u64()).collect();
        RandomStream::from_values(values)
    }

    pub fn from_values(values: Vec<u64>) -> Self {
        RandomStream { values, cursor: 0 }
    }

    /// Parse the comma-separated decimal form written by [`to_persisted`].
    ///
    /// Whitespace around each token is ignored so a trailing newline is
    /// accepted. Blank input gives an empty stream.
    ///
    /// [`to_persisted`]: RandomStream::to_persisted
    pub fn from_persisted(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(RandomStream::from_values(Vec::new()));
        }

        let values = text
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token
                    .parse::<u64>()
                    .map_err(|_| ZobristError::MalformedPersistedData {
                        index,
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<u64>>>()?;

        Ok(RandomStream::from_values(values))
    }

    /// Every value of the stream, consumed or not, in generation order.
    pub fn to_persisted(&self) -> String {
        let parts: Vec<String> = self.values.iter().map(u64::to_string).collect();
        parts.join(",")
    }

    /// Draw the next value
    #[inline]
    pub fn next_value(&mut self) -> Result<u64> {
        self.require(1)?;
        let value = self.values[self.cursor];
        self.cursor += 1;
        Ok(value)
    }

    /// Fail unless at least `needed` more values can be drawn.
    ///
    /// Both fields of the error count from the current position.
    pub fn require(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(ZobristError::ExhaustedStream {
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// ChaCha20 key for `seed`: the seed in little-endian order, zero padded.
fn seed_bytes(seed: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_yields_required_count() {
        let stream = RandomStream::generate(DEFAULT_SEED);
        assert_eq!(stream.len(), 1050);
        assert_eq!(stream.remaining(), 1050);
    }

    #[test]
    fn next_value_past_end_is_exhausted() {
        let mut stream = RandomStream::from_values(vec![7]);
        assert_eq!(stream.next_value().unwrap(), 7);
        match stream.next_value() {
            Err(ZobristError::ExhaustedStream { needed, available }) => {
                assert_eq!(needed, 1);
                assert_eq!(available, 0);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn generate_matches_known_values() {
        let stream = RandomStream::generate(DEFAULT_SEED);
        assert_eq!(stream.values()[0], 5134455219647751522);
        assert_eq!(stream.values()[1], 3719293909763766225);
        assert_eq!(stream.values()[1049], 7222346998306427695);
    }

    #[test]
    fn persisted_text_has_no_trailing_separator() {
        let stream = RandomStream::from_values(vec![1, 2, u64::MAX]);
        assert_eq!(stream.to_persisted(), "1,2,18446744073709551615");
    }

    #[test]
    fn from_persisted_tolerates_whitespace() {
        let stream = RandomStream::from_persisted("1, 2 ,3\n").unwrap();
        assert_eq!(stream.values(), &[1, 2, 3]);
    }

    #[test]
    fn from_persisted_reports_bad_token() {
        match RandomStream::from_persisted("1,2,x3,4") {
            Err(ZobristError::MalformedPersistedData { index, token }) => {
                assert_eq!(index, 2);
                assert_eq!(token, "x3");
            }
            other => panic!("expected malformed data, got {:?}", other),
        }
    }

    #[test]
    fn from_persisted_rejects_negative_and_overflow() {
        assert!(RandomStream::from_persisted("-1").is_err());
        assert!(RandomStream::from_persisted("18446744073709551616").is_err());
        assert!(RandomStream::from_persisted("1,,2").is_err());
    }
}
