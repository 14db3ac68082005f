//! Persisted settings: fixed-layout record, validation, and the
//! fallback-to-defaults policy.

use crate::config;

/// Two little-endian `i32`s: frequency, then volume.
pub const RECORD_LEN: usize = 8;

#[derive(Clone, Copy, PartialEq, Eq, Debug, defmt::Format)]
pub struct Settings {
    pub freq_hz: u32,
    pub volume: u8,
}

impl Settings {
    pub const DEFAULT: Settings = Settings {
        freq_hz: config::tone::FREQ_HZ_INITIAL,
        volume: config::volume::LEVEL_INITIAL,
    };

    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut record = [0; RECORD_LEN];
        record[..4].copy_from_slice(&(self.freq_hz as i32).to_le_bytes());
        record[4..].copy_from_slice(&i32::from(self.volume).to_le_bytes());
        record
    }

    /// `None` if either field is outside its domain. The record is never
    /// partially trusted: one bad field discards the whole thing.
    pub fn decode(record: &[u8; RECORD_LEN]) -> Option<Settings> {
        let freq = i32::from_le_bytes([record[0], record[1], record[2], record[3]]);
        let volume = i32::from_le_bytes([record[4], record[5], record[6], record[7]]);

        let freq_ok = freq >= config::tone::FREQ_HZ_MIN as i32
            && freq <= config::tone::FREQ_HZ_MAX as i32;
        let volume_ok = volume >= i32::from(config::volume::LEVEL_MIN)
            && volume <= i32::from(config::volume::LEVEL_MAX);

        if freq_ok && volume_ok {
            Some(Settings {
                freq_hz: freq as u32,
                volume: volume as u8,
            })
        } else {
            None
        }
    }
}

/// Backing storage for the settings record.
pub trait RecordStorage {
    type Error;

    fn read(&mut self, record: &mut [u8; RECORD_LEN]) -> Result<(), Self::Error>;
    fn write(&mut self, record: &[u8; RECORD_LEN]) -> Result<(), Self::Error>;
}

#[derive(defmt::Format)]
pub enum LoadError<E> {
    Storage(E),
    Invalid,
}

/// Read and validate the stored record. The caller substitutes
/// [`Settings::DEFAULT`] on any error; the fallback lives at the call site so
/// the failure can be logged there.
pub fn load<S: RecordStorage>(storage: &mut S) -> Result<Settings, LoadError<S::Error>> {
    let mut record = [0; RECORD_LEN];
    storage.read(&mut record).map_err(LoadError::Storage)?;
    Settings::decode(&record).ok_or(LoadError::Invalid)
}

/// Write the full record back. Failures are non-fatal: in-memory state stays
/// authoritative and the write is retried on the next user-visible change.
pub fn save<S: RecordStorage>(storage: &mut S, settings: &Settings) -> Result<(), S::Error> {
    storage.write(&settings.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeStorage {
        record: Option<[u8; RECORD_LEN]>,
        fail_reads: bool,
    }

    struct IoError;

    impl RecordStorage for FakeStorage {
        type Error = IoError;

        fn read(&mut self, record: &mut [u8; RECORD_LEN]) -> Result<(), IoError> {
            if self.fail_reads {
                return Err(IoError);
            }
            *record = self.record.ok_or(IoError)?;
            Ok(())
        }

        fn write(&mut self, record: &[u8; RECORD_LEN]) -> Result<(), IoError> {
            self.record = Some(*record);
            Ok(())
        }
    }

    #[test]
    fn saved_settings_load_back() {
        let mut storage = FakeStorage::default();
        let settings = Settings {
            freq_hz: 430,
            volume: 3,
        };
        save(&mut storage, &settings).ok().unwrap();
        let loaded = load(&mut storage).ok().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn out_of_bounds_volume_invalidates_the_whole_record() {
        let mut storage = FakeStorage::default();
        let mut record = Settings::DEFAULT.encode();
        record[4..].copy_from_slice(&99i32.to_le_bytes());
        storage.record = Some(record);
        assert!(matches!(load(&mut storage), Err(LoadError::Invalid)));
    }

    #[test]
    fn out_of_bounds_frequency_invalidates_the_whole_record() {
        for bad_freq in [0i32, 9, 801, -440] {
            let mut storage = FakeStorage::default();
            let mut record = Settings::DEFAULT.encode();
            record[..4].copy_from_slice(&bad_freq.to_le_bytes());
            storage.record = Some(record);
            assert!(matches!(load(&mut storage), Err(LoadError::Invalid)));
        }
    }

    #[test]
    fn storage_errors_are_distinguished_from_corruption() {
        let mut storage = FakeStorage {
            record: None,
            fail_reads: true,
        };
        assert!(matches!(load(&mut storage), Err(LoadError::Storage(_))));
    }

    #[test]
    fn defaults_are_within_bounds() {
        let roundtrip = Settings::decode(&Settings::DEFAULT.encode());
        assert_eq!(roundtrip, Some(Settings::DEFAULT));
    }
}
