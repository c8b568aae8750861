//! String interning with an open-addressed hash table.
//!
//! Every string in a program — identifiers, string literals, and runtime
//! concatenation results — is stored exactly once and referred to by a
//! `StrId`. Interning makes string equality a handle comparison, which is
//! what lets the value model compare strings by identity.
//!
//! The table is deliberately hand-rolled rather than a `HashMap`: the probe
//! layout is part of the contract. Keys hash with FNV-1a; collisions probe
//! linearly; deleted slots leave tombstones that keep probe chains intact
//! and are recycled on insertion. The table grows at a 0.75 load factor,
//! doubling capacity (minimum 8) and dropping tombstones in the process.

use serde::{Deserialize, Serialize};

/// FNV-1a offset basis.
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
/// FNV-1a prime.
const FNV_PRIME: u32 = 16_777_619;

/// Maximum load (live entries plus tombstones) before the table grows.
const MAX_LOAD_NUM: usize = 3;
const MAX_LOAD_DEN: usize = 4;

/// Smallest slot-array capacity.
const MIN_CAPACITY: usize = 8;

/// Handle to an interned string.
///
/// Two `StrId`s compare equal exactly when their contents are equal, because
/// the table guarantees a single live entry per distinct byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrId(u32);

impl StrId {
    fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("intern table overflow"))
    }

    /// Returns the raw index value.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Hashes a byte sequence with 32-bit FNV-1a.
pub(crate) fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// One slot of the probe array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Slot {
    /// Never occupied; terminates a miss probe.
    Empty,
    /// Previously occupied; probing continues past it, insertion may reuse it.
    Tombstone,
    Occupied(StrId),
}

/// An interned string and its precomputed hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    text: Box<str>,
    hash: u32,
}

/// The intern table.
///
/// Entries are addressed two ways: by `StrId` through the dense `entries`
/// vec, and by content through the open-addressed `slots` probe array.
/// Removed entries leave their `StrId` dangling (ids are never reused), so
/// removal is only sound once no live `Value` refers to the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Interns {
    entries: Vec<Option<Entry>>,
    slots: Vec<Slot>,
    /// Occupied plus tombstone slots; drives the load-factor check.
    used: usize,
}

impl Default for Interns {
    fn default() -> Self {
        Self::new()
    }
}

impl Interns {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: vec![Slot::Empty; MIN_CAPACITY],
            used: 0,
        }
    }

    /// Returns the canonical id for `text`, copying it into the table if it
    /// is not already interned.
    pub fn copy(&mut self, text: &str) -> StrId {
        let hash = fnv1a(text.as_bytes());
        if let Some(id) = self.probe(text, hash) {
            return id;
        }
        self.insert(text.to_owned().into_boxed_str(), hash)
    }

    /// Returns the canonical id for `text`, taking ownership of the buffer.
    ///
    /// If the content is already interned the buffer is dropped and the
    /// existing id returned; otherwise the buffer itself becomes the
    /// canonical copy.
    pub fn take(&mut self, text: String) -> StrId {
        let hash = fnv1a(text.as_bytes());
        if let Some(id) = self.probe(&text, hash) {
            return id;
        }
        self.insert(text.into_boxed_str(), hash)
    }

    /// Probes for `text` by content without allocating.
    pub fn find_by_bytes(&self, text: &str) -> Option<StrId> {
        self.probe(text, fnv1a(text.as_bytes()))
    }

    /// Resolves an id to its text.
    ///
    /// # Panics
    /// Panics if the id was removed from the table.
    pub fn get(&self, id: StrId) -> &str {
        self.entries[id.index()]
            .as_ref()
            .map(|entry| &*entry.text)
            .expect("StrId refers to a removed intern entry")
    }

    /// Removes an entry, leaving a tombstone in its probe slot.
    ///
    /// The id is retired permanently; `get` on it panics afterwards. The
    /// interpreter never retires strings (they live as long as the runner),
    /// so this is the deletion half of the tombstone protocol for hosts
    /// that manage table contents directly.
    pub fn remove(&mut self, id: StrId) {
        let Some(entry) = self.entries[id.index()].take() else {
            return;
        };
        let mut index = entry.hash as usize % self.slots.len();
        loop {
            match self.slots[index] {
                Slot::Occupied(slot_id) if slot_id == id => {
                    // `used` stays put: tombstones still count toward load.
                    self.slots[index] = Slot::Tombstone;
                    return;
                }
                Slot::Empty => return,
                _ => index = (index + 1) % self.slots.len(),
            }
        }
    }

    /// Number of live interned strings.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    /// Walks the probe sequence for `text`, returning the id on a hit.
    ///
    /// Tombstones are skipped (the chain continues past them); a
    /// never-occupied slot ends the probe as a miss.
    fn probe(&self, text: &str, hash: u32) -> Option<StrId> {
        let mut index = hash as usize % self.slots.len();
        loop {
            match self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(id) => {
                    let entry = self.entries[id.index()]
                        .as_ref()
                        .expect("occupied slot points at removed entry");
                    if entry.hash == hash && &*entry.text == text {
                        return Some(id);
                    }
                }
            }
            index = (index + 1) % self.slots.len();
        }
    }

    /// Inserts a string known to be absent.
    fn insert(&mut self, text: Box<str>, hash: u32) -> StrId {
        if (self.used + 1) * MAX_LOAD_DEN > self.slots.len() * MAX_LOAD_NUM {
            self.grow();
        }

        let id = StrId::new(self.entries.len());
        self.entries.push(Some(Entry { text, hash }));

        let mut index = hash as usize % self.slots.len();
        loop {
            match self.slots[index] {
                Slot::Empty => {
                    self.slots[index] = Slot::Occupied(id);
                    self.used += 1;
                    return id;
                }
                Slot::Tombstone => {
                    // Reusing a tombstone does not change the load: the
                    // slot already counted toward `used`.
                    self.slots[index] = Slot::Occupied(id);
                    return id;
                }
                Slot::Occupied(_) => index = (index + 1) % self.slots.len(),
            }
        }
    }

    /// Doubles the slot array and reinserts every live entry.
    ///
    /// Tombstones are not carried over, so `used` collapses back to the
    /// live entry count.
    fn grow(&mut self) {
        let capacity = (self.slots.len() * 2).max(MIN_CAPACITY);
        self.slots = vec![Slot::Empty; capacity];
        self.used = 0;
        for (index, entry) in self.entries.iter().enumerate() {
            let Some(entry) = entry else { continue };
            let mut slot = entry.hash as usize % capacity;
            while self.slots[slot] != Slot::Empty {
                slot = (slot + 1) % capacity;
            }
            self.slots[slot] = Slot::Occupied(StrId::new(index));
            self.used += 1;
        }
    }
}
