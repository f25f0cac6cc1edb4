//! Table registry
//!
//! In-memory catalog mapping a storage address to the record size and owner
//! of the table bound there. Built once at startup; no storage I/O happens
//! here.
//!
//! The registry is an explicit object owned by the startup sequence and handed
//! by reference to every table accessor, so registration order and lifetime
//! are visible to the caller (and testable in isolation).

use super::error::DatabaseError;
use super::layout::{MARKER_ADDRESS, MARKER_LEN, MAX_RECORD_SIZE, MAX_TABLES};
use crate::traits::range_fits;
use heapless::Vec;

/// Opaque handle naming the table instance that registered a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOwner(&'static str);

impl TableOwner {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

/// One registered table: where it lives, how big it is, who owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Start address on the medium
    pub address: u16,
    /// Record size in bytes, fixed at registration
    pub size: u16,
    /// Registering table
    pub owner: TableOwner,
}

impl TableDescriptor {
    /// One past the last byte of the table
    pub fn end(&self) -> u32 {
        self.address as u32 + self.size as u32
    }

    /// Whether two tables share at least one byte
    pub fn overlaps(&self, other: &TableDescriptor) -> bool {
        (self.address as u32) < other.end() && (other.address as u32) < self.end()
    }
}

/// Outcome of a successful registration
///
/// Duplicate and overlapping registrations are accepted (lookup stays
/// first-registered-wins) but reported so the caller can warn about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Address and range are not used by any other table
    Unique,
    /// Another table already registered this address; it keeps winning lookups
    Shadowed { first: TableOwner },
    /// Range overlaps a table registered at a different address
    Overlapping { other: TableOwner },
}

/// Catalog of registered tables
///
/// # Example
///
/// ```
/// use confdb_core::database::{TableOwner, TableRegistry};
///
/// let mut registry = TableRegistry::new(512);
/// registry.register(5, 32, TableOwner::new("a")).unwrap();
///
/// let found = registry.find(5).unwrap();
/// assert_eq!(found.size, 32);
/// assert!(registry.find(37).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: Vec<TableDescriptor, MAX_TABLES>,
    capacity: u32,
}

impl TableRegistry {
    /// Create an empty registry for a medium of `capacity` bytes
    pub fn new(capacity: u32) -> Self {
        Self {
            tables: Vec::new(),
            capacity,
        }
    }

    /// Medium capacity tables are checked against
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Append a descriptor
    ///
    /// # Errors
    ///
    /// Rejected registrations leave the registry unchanged:
    /// - `RecordTooLarge` if `size > MAX_RECORD_SIZE`
    /// - `OutOfBounds` if `[address, address + size)` exceeds the capacity
    /// - `ReservedRegion` if the range overlaps the validity marker
    /// - `RegistryFull` if `MAX_TABLES` descriptors already exist
    pub fn register(
        &mut self,
        address: u16,
        size: usize,
        owner: TableOwner,
    ) -> Result<Registration, DatabaseError> {
        if size > MAX_RECORD_SIZE {
            return Err(DatabaseError::RecordTooLarge);
        }
        if !range_fits(address, size, self.capacity) {
            return Err(DatabaseError::OutOfBounds);
        }

        let descriptor = TableDescriptor {
            address,
            size: size as u16,
            owner,
        };

        let marker = TableDescriptor {
            address: MARKER_ADDRESS,
            size: MARKER_LEN as u16,
            owner: TableOwner::new("marker"),
        };
        if descriptor.overlaps(&marker) {
            return Err(DatabaseError::ReservedRegion);
        }

        let outcome = if let Some(first) = self.find(address) {
            Registration::Shadowed { first: first.owner }
        } else if let Some(other) = self.tables.iter().find(|t| t.overlaps(&descriptor)) {
            Registration::Overlapping { other: other.owner }
        } else {
            Registration::Unique
        };

        self.tables
            .push(descriptor)
            .map_err(|_| DatabaseError::RegistryFull)?;
        Ok(outcome)
    }

    /// Resolve `address` to the first descriptor registered there
    pub fn find(&self, address: u16) -> Option<TableDescriptor> {
        self.tables.iter().find(|t| t.address == address).copied()
    }

    /// Descriptor with the highest address, if any
    pub fn last_table(&self) -> Option<TableDescriptor> {
        self.tables.iter().max_by_key(|t| t.address).copied()
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: TableOwner = TableOwner::new("a");
    const B: TableOwner = TableOwner::new("b");

    #[test]
    fn test_register_and_find() {
        let mut registry = TableRegistry::new(512);
        assert!(registry.is_empty());

        assert_eq!(registry.register(8, 32, A), Ok(Registration::Unique));
        assert_eq!(registry.register(40, 16, B), Ok(Registration::Unique));
        assert_eq!(registry.len(), 2);

        let a = registry.find(8).unwrap();
        assert_eq!(a.size, 32);
        assert_eq!(a.owner, A);
        assert_eq!(registry.find(40).unwrap().owner, B);
        assert_eq!(registry.find(56), None);
    }

    #[test]
    fn test_duplicate_address_first_wins() {
        let mut registry = TableRegistry::new(512);
        registry.register(8, 32, A).unwrap();

        let outcome = registry.register(8, 16, B).unwrap();
        assert_eq!(outcome, Registration::Shadowed { first: A });
        assert_eq!(registry.len(), 2);

        let found = registry.find(8).unwrap();
        assert_eq!(found.owner, A);
        assert_eq!(found.size, 32);
    }

    #[test]
    fn test_overlapping_range_reported() {
        let mut registry = TableRegistry::new(512);
        registry.register(8, 32, A).unwrap();

        assert_eq!(
            registry.register(20, 4, B),
            Ok(Registration::Overlapping { other: A })
        );
        // Adjacent is not overlapping
        assert_eq!(
            registry.register(40, 4, TableOwner::new("c")),
            Ok(Registration::Unique)
        );
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut registry = TableRegistry::new(64);
        assert_eq!(registry.register(40, 32, A), Err(DatabaseError::OutOfBounds));
        assert!(registry.is_empty());

        // Exactly at the end is fine
        assert_eq!(registry.register(32, 32, A), Ok(Registration::Unique));
    }

    #[test]
    fn test_marker_region_rejected() {
        let mut registry = TableRegistry::new(512);
        assert_eq!(registry.register(0, 8, A), Err(DatabaseError::ReservedRegion));
        assert_eq!(registry.register(3, 8, A), Err(DatabaseError::ReservedRegion));
        assert_eq!(registry.register(4, 8, A), Ok(Registration::Unique));
    }

    #[test]
    fn test_record_too_large_rejected() {
        let mut registry = TableRegistry::new(u16::MAX as u32);
        assert_eq!(
            registry.register(8, MAX_RECORD_SIZE + 1, A),
            Err(DatabaseError::RecordTooLarge)
        );
    }

    #[test]
    fn test_registry_full() {
        let mut registry = TableRegistry::new(4096);
        for i in 0..MAX_TABLES {
            registry.register(8 + (i as u16) * 10, 10, A).unwrap();
        }
        assert_eq!(registry.register(1000, 10, B), Err(DatabaseError::RegistryFull));
        assert_eq!(registry.len(), MAX_TABLES);
    }

    #[test]
    fn test_last_table() {
        let mut registry = TableRegistry::new(512);
        assert_eq!(registry.last_table(), None);

        registry.register(100, 10, A).unwrap();
        registry.register(20, 10, B).unwrap();
        assert_eq!(registry.last_table().unwrap().owner, A);
    }

    #[test]
    fn test_iter_preserves_registration_order() {
        let mut registry = TableRegistry::new(512);
        registry.register(100, 10, A).unwrap();
        registry.register(20, 10, B).unwrap();

        let mut it = registry.iter();
        assert_eq!(it.next().unwrap().address, 100);
        assert_eq!(it.next().unwrap().address, 20);
        assert!(it.next().is_none());
    }
}
