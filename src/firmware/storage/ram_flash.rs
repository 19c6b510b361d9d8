use embedded_storage::{ReadStorage, Storage};

pub(crate) const RAM_FLASH_LEN: usize = 4096;

/// Erased-on-creation flash stand-in for host tests.
#[derive(Clone)]
pub(crate) struct RamFlash {
    bytes: [u8; RAM_FLASH_LEN],
    pub(crate) fail_reads: bool,
    pub(crate) fail_writes: bool,
    /// Writes that still succeed; `None` means no limit.
    pub(crate) writes_left: Option<u32>,
    pub(crate) writes: u32,
}

impl RamFlash {
    pub(crate) fn new() -> Self {
        Self {
            bytes: [0xFF; RAM_FLASH_LEN],
            fail_reads: false,
            fail_writes: false,
            writes_left: None,
            writes: 0,
        }
    }

    pub(crate) fn corrupt_byte(&mut self, offset: usize) {
        self.bytes[offset] ^= 0x01;
    }
}

#[derive(Debug)]
pub(crate) struct RamFlashError;

impl ReadStorage for RamFlash {
    type Error = RamFlashError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(RamFlashError);
        }
        let start = offset as usize;
        let src = self
            .bytes
            .get(start..start + bytes.len())
            .ok_or(RamFlashError)?;
        bytes.copy_from_slice(src);
        Ok(())
    }

    fn capacity(&self) -> usize {
        RAM_FLASH_LEN
    }
}

impl Storage for RamFlash {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes || self.writes_left == Some(0) {
            return Err(RamFlashError);
        }
        let start = offset as usize;
        let dst = self
            .bytes
            .get_mut(start..start + bytes.len())
            .ok_or(RamFlashError)?;
        dst.copy_from_slice(bytes);
        self.writes += 1;
        if let Some(left) = self.writes_left.as_mut() {
            *left -= 1;
        }
        Ok(())
    }
}
