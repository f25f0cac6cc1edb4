//! Generic table accessor
//!
//! [`DatabaseTable<T>`] binds one registry entry to a concrete record type and
//! mediates all I/O for it. The I/O length is always the size recorded in the
//! registry, never the caller's idea of the record size: if the two disagree
//! (a stale record type used against a table), the operation fails with
//! `SizeMismatch` before touching the medium.
//!
//! Every operation is a no-op on the medium when the address is not
//! registered.

use super::error::DatabaseError;
use super::layout::MAX_RECORD_SIZE;
use super::record::Record;
use super::registry::{Registration, TableDescriptor, TableOwner, TableRegistry};
use crate::traits::StorageDriver;
use core::marker::PhantomData;

/// Schema-aware accessor for one table holding records of type `T`
///
/// # Example
///
/// ```
/// use confdb_core::database::{DatabaseTable, TableOwner, TableRegistry};
/// use confdb_core::tables::OtaConfig;
///
/// let mut registry = TableRegistry::new(4096);
/// let mut ota = DatabaseTable::<OtaConfig>::new(TableOwner::new("ota"));
/// ota.register_table(&mut registry, 300).unwrap();
/// assert_eq!(ota.address(), Some(300));
/// ```
pub struct DatabaseTable<T> {
    owner: TableOwner,
    address: Option<u16>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> DatabaseTable<T> {
    /// Create an accessor that is not yet registered
    pub const fn new(owner: TableOwner) -> Self {
        Self {
            owner,
            address: None,
            _record: PhantomData,
        }
    }

    pub fn owner(&self) -> TableOwner {
        self.owner
    }

    /// Address this accessor registered at
    pub fn address(&self) -> Option<u16> {
        self.address
    }

    pub fn is_registered(&self) -> bool {
        self.address.is_some()
    }

    /// Register this table at `address` with `size = T::SIZE`
    ///
    /// Must be called once before any get/set/clear.
    pub fn register_table(
        &mut self,
        registry: &mut TableRegistry,
        address: u16,
    ) -> Result<Registration, DatabaseError> {
        let outcome = registry.register(address, T::SIZE, self.owner)?;
        self.address = Some(address);
        Ok(outcome)
    }

    /// Load the record stored at `address` into `out`
    ///
    /// `out` is left untouched on any error.
    pub fn get_table<D: StorageDriver>(
        &self,
        registry: &TableRegistry,
        driver: &mut D,
        address: u16,
        out: &mut T,
    ) -> Result<(), DatabaseError> {
        let descriptor = self.resolve(registry, address)?;
        let mut scratch = [0u8; MAX_RECORD_SIZE];
        let bytes = &mut scratch[..descriptor.size as usize];
        driver.read(descriptor.address, bytes)?;
        *out = T::decode(bytes);
        Ok(())
    }

    /// Store `value` at `address`
    pub fn set_table<D: StorageDriver>(
        &self,
        registry: &TableRegistry,
        driver: &mut D,
        address: u16,
        value: &T,
    ) -> Result<(), DatabaseError> {
        let descriptor = self.resolve(registry, address)?;
        let mut scratch = [0u8; MAX_RECORD_SIZE];
        let bytes = &mut scratch[..descriptor.size as usize];
        value.encode(bytes);
        driver.write(descriptor.address, bytes)?;
        Ok(())
    }

    /// Erase the registered size at `address`
    pub fn clear_table<D: StorageDriver>(
        &self,
        registry: &TableRegistry,
        driver: &mut D,
        address: u16,
    ) -> Result<(), DatabaseError> {
        let descriptor = self.resolve(registry, address)?;
        driver.erase(descriptor.address, descriptor.size)?;
        Ok(())
    }

    /// `get_table` at this accessor's own address
    pub fn get<D: StorageDriver>(
        &self,
        registry: &TableRegistry,
        driver: &mut D,
        out: &mut T,
    ) -> Result<(), DatabaseError> {
        let address = self.address.ok_or(DatabaseError::NotRegistered)?;
        self.get_table(registry, driver, address, out)
    }

    /// `set_table` at this accessor's own address
    pub fn set<D: StorageDriver>(
        &self,
        registry: &TableRegistry,
        driver: &mut D,
        value: &T,
    ) -> Result<(), DatabaseError> {
        let address = self.address.ok_or(DatabaseError::NotRegistered)?;
        self.set_table(registry, driver, address, value)
    }

    /// `clear_table` at this accessor's own address
    pub fn clear<D: StorageDriver>(
        &self,
        registry: &TableRegistry,
        driver: &mut D,
    ) -> Result<(), DatabaseError> {
        let address = self.address.ok_or(DatabaseError::NotRegistered)?;
        self.clear_table(registry, driver, address)
    }

    fn resolve(
        &self,
        registry: &TableRegistry,
        address: u16,
    ) -> Result<TableDescriptor, DatabaseError> {
        if self.address.is_none() {
            return Err(DatabaseError::NotRegistered);
        }
        let descriptor = registry
            .find(address)
            .ok_or(DatabaseError::NotRegistered)?;
        if descriptor.size as usize != T::SIZE {
            return Err(DatabaseError::SizeMismatch);
        }
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::record::{RecordReader, RecordWriter};
    use crate::traits::StorageError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    struct Pair {
        a: u32,
        b: u16,
    }

    impl Record for Pair {
        const SIZE: usize = 6;

        fn encode(&self, buf: &mut [u8]) {
            let mut w = RecordWriter::new(buf);
            w.put_u32(self.a);
            w.put_u16(self.b);
        }

        fn decode(buf: &[u8]) -> Self {
            let mut r = RecordReader::new(buf);
            Self {
                a: r.get_u32(),
                b: r.get_u16(),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    struct Wide([u8; 8]);

    impl Record for Wide {
        const SIZE: usize = 8;

        fn encode(&self, buf: &mut [u8]) {
            RecordWriter::new(buf).put_bytes(&self.0);
        }

        fn decode(buf: &[u8]) -> Self {
            Self(RecordReader::new(buf).get_array())
        }
    }

    /// RAM medium counting every I/O call
    struct RamDriver {
        bytes: [u8; 128],
        io_calls: usize,
        fail_reads: bool,
    }

    impl RamDriver {
        fn new() -> Self {
            Self {
                bytes: [0; 128],
                io_calls: 0,
                fail_reads: false,
            }
        }
    }

    impl StorageDriver for RamDriver {
        fn begin(&mut self, _size: u32) -> Result<(), StorageError> {
            Ok(())
        }

        fn clean_all(&mut self) -> Result<(), StorageError> {
            self.bytes.fill(0);
            Ok(())
        }

        fn is_valid(&mut self) -> bool {
            true
        }

        fn max_size(&self) -> u32 {
            self.bytes.len() as u32
        }

        fn format(&mut self) -> Result<(), StorageError> {
            Ok(())
        }

        fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), StorageError> {
            self.io_calls += 1;
            if self.fail_reads {
                return Err(StorageError::ReadFailed);
            }
            let start = address as usize;
            buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
            Ok(())
        }

        fn write(&mut self, address: u16, data: &[u8]) -> Result<(), StorageError> {
            self.io_calls += 1;
            let start = address as usize;
            self.bytes[start..start + data.len()].copy_from_slice(data);
            Ok(())
        }

        fn erase(&mut self, address: u16, len: u16) -> Result<(), StorageError> {
            self.io_calls += 1;
            let start = address as usize;
            self.bytes[start..start + len as usize].fill(0);
            Ok(())
        }
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let mut registry = TableRegistry::new(128);
        let mut driver = RamDriver::new();
        let mut table = DatabaseTable::<Pair>::new(TableOwner::new("pair"));
        table.register_table(&mut registry, 16).unwrap();

        let value = Pair { a: 0xCAFEBABE, b: 7 };
        table.set(&registry, &mut driver, &value).unwrap();

        let mut out = Pair::default();
        table.get(&registry, &mut driver, &mut out).unwrap();
        assert_eq!(out, value);
        assert_eq!(&driver.bytes[16..22], &[0xBE, 0xBA, 0xFE, 0xCA, 7, 0]);
    }

    #[test]
    fn test_clear_zeroes_registered_range_only() {
        let mut registry = TableRegistry::new(128);
        let mut driver = RamDriver::new();
        driver.bytes.fill(0xEE);
        let mut table = DatabaseTable::<Pair>::new(TableOwner::new("pair"));
        table.register_table(&mut registry, 16).unwrap();

        table.clear(&registry, &mut driver).unwrap();
        assert!(driver.bytes[16..22].iter().all(|&b| b == 0));
        assert_eq!(driver.bytes[15], 0xEE);
        assert_eq!(driver.bytes[22], 0xEE);
    }

    #[test]
    fn test_unregistered_address_is_noop() {
        let mut registry = TableRegistry::new(128);
        let mut driver = RamDriver::new();
        let mut table = DatabaseTable::<Pair>::new(TableOwner::new("pair"));
        table.register_table(&mut registry, 16).unwrap();

        let mut out = Pair { a: 1, b: 2 };
        assert_eq!(
            table.get_table(&registry, &mut driver, 40, &mut out),
            Err(DatabaseError::NotRegistered)
        );
        assert_eq!(out, Pair { a: 1, b: 2 });
        assert_eq!(
            table.set_table(&registry, &mut driver, 40, &out),
            Err(DatabaseError::NotRegistered)
        );
        assert_eq!(
            table.clear_table(&registry, &mut driver, 40),
            Err(DatabaseError::NotRegistered)
        );
        assert_eq!(driver.io_calls, 0);
    }

    #[test]
    fn test_use_before_registration_fails_without_io() {
        let mut registry = TableRegistry::new(128);
        let mut driver = RamDriver::new();
        let unregistered = DatabaseTable::<Pair>::new(TableOwner::new("late"));

        // Even an address another table registered is off limits
        let mut other = DatabaseTable::<Pair>::new(TableOwner::new("pair"));
        other.register_table(&mut registry, 16).unwrap();

        let mut out = Pair::default();
        assert_eq!(
            unregistered.get(&registry, &mut driver, &mut out),
            Err(DatabaseError::NotRegistered)
        );
        assert_eq!(
            unregistered.get_table(&registry, &mut driver, 16, &mut out),
            Err(DatabaseError::NotRegistered)
        );
        assert_eq!(
            unregistered.clear(&registry, &mut driver),
            Err(DatabaseError::NotRegistered)
        );
        assert_eq!(driver.io_calls, 0);
    }

    #[test]
    fn test_size_mismatch_blocks_io() {
        let mut registry = TableRegistry::new(128);
        let mut driver = RamDriver::new();
        let mut pair = DatabaseTable::<Pair>::new(TableOwner::new("pair"));
        pair.register_table(&mut registry, 16).unwrap();

        // Stale/wrong record type pointed at the pair table
        let mut wide = DatabaseTable::<Wide>::new(TableOwner::new("wide"));
        wide.register_table(&mut registry, 64).unwrap();

        let mut out = Wide::default();
        assert_eq!(
            wide.get_table(&registry, &mut driver, 16, &mut out),
            Err(DatabaseError::SizeMismatch)
        );
        assert_eq!(
            wide.set_table(&registry, &mut driver, 16, &Wide([0xAA; 8])),
            Err(DatabaseError::SizeMismatch)
        );
        assert_eq!(driver.io_calls, 0);
    }

    #[test]
    fn test_read_failure_leaves_out_untouched() {
        let mut registry = TableRegistry::new(128);
        let mut driver = RamDriver::new();
        driver.fail_reads = true;
        let mut table = DatabaseTable::<Pair>::new(TableOwner::new("pair"));
        table.register_table(&mut registry, 16).unwrap();

        let mut out = Pair { a: 9, b: 9 };
        assert_eq!(
            table.get(&registry, &mut driver, &mut out),
            Err(DatabaseError::Storage(StorageError::ReadFailed))
        );
        assert_eq!(out, Pair { a: 9, b: 9 });
    }

    #[test]
    fn test_failed_registration_keeps_accessor_unregistered() {
        let mut registry = TableRegistry::new(128);
        let mut table = DatabaseTable::<Pair>::new(TableOwner::new("pair"));
        assert_eq!(
            table.register_table(&mut registry, 125),
            Err(DatabaseError::OutOfBounds)
        );
        assert!(!table.is_registered());
    }
}
