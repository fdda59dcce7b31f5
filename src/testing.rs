//! Test-only helpers.

use rand_core::{CryptoRng, Error as RngError, RngCore};

/// RNG replaying a fixed byte stream.
///
/// Every fill consumes exactly the requested number of bytes; when fewer
/// remain, the fill fails without consuming anything. (The cursor never
/// advances past data that was not handed out.)
pub(crate) struct FixedRng {
    data: Vec<u8>,
    position: usize,
}

impl FixedRng {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            position: 0,
        }
    }
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0_u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0_u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.try_fill_bytes(dest).expect("fixed stream exhausted");
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
        let remaining = self.data.len() - self.position;
        if remaining < dest.len() {
            return Err(RngError::new("fixed stream exhausted"));
        }
        dest.copy_from_slice(&self.data[self.position..self.position + dest.len()]);
        self.position += dest.len();
        Ok(())
    }
}

impl CryptoRng for FixedRng {}
