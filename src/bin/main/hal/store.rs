//! Settings persistence in the last page of internal flash.

use sinebox::config;
use sinebox::settings::{RecordStorage, RECORD_LEN};
use stm32f1xx_hal::flash::{self, FlashSize, Parts, SectorSize};

pub struct FlashStore {
    flash: Parts,
}

impl FlashStore {
    /// `flash` retains ownership of the whole flash peripheral; the store
    /// only ever touches the reserved page that `memory.x` keeps the program
    /// image out of.
    pub fn new(flash: Parts) -> Self {
        Self { flash }
    }
}

impl RecordStorage for FlashStore {
    type Error = flash::Error;

    fn read(&mut self, record: &mut [u8; RECORD_LEN]) -> Result<(), flash::Error> {
        let writer = self.flash.writer(SectorSize::Sz1K, FlashSize::Sz64K);
        let bytes = writer.read(config::store::OFFSET, RECORD_LEN)?;
        record.copy_from_slice(bytes);
        Ok(())
    }

    fn write(&mut self, record: &[u8; RECORD_LEN]) -> Result<(), flash::Error> {
        let mut writer = self.flash.writer(SectorSize::Sz1K, FlashSize::Sz64K);
        // the page must be erased before the record can be programmed
        writer.erase(config::store::OFFSET, config::store::PAGE_LEN)?;
        writer.write(config::store::OFFSET, record)
    }
}
