//! Cache set: a fixed array of ways plus an intrusive traversal order.
//!
//! The order list links ways by index (`prev`/`next` per way) and never
//! allocates after construction. It is pure bookkeeping: policies decide what
//! it means. SRRIP only moves inserted and invalidated ways to the tail, while
//! LRU treats the head as most recently used.
//!
//! ```text
//!   entries: [ way0 | way1 | way2 | way3 ]      (indexed by way, never reordered)
//!
//!   head ─► [2] ◄──► [0] ◄──► [3] ◄──► [1] ◄── tail
//! ```

use std::fmt;

use super::entry::CacheEntry;

/// Links of one way in the order list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct OrderLink {
    prev: Option<usize>,
    next: Option<usize>,
}

/// All ways for one cache index.
#[derive(Clone, Debug)]
pub struct CacheSet {
    index: usize,
    entries: Box<[CacheEntry]>,
    links: Box<[OrderLink]>,
    head: usize,
    tail: usize,
}

impl CacheSet {
    /// Creates set `index` with `ways` invalid entries, ordered `0..ways`.
    ///
    /// # Panics
    ///
    /// Panics if `ways` is zero; configuration validation rejects that earlier.
    pub fn new(index: usize, ways: usize) -> Self {
        assert!(ways > 0, "a cache set needs at least one way");
        let entries = (0..ways).map(|way| CacheEntry::new(index, way)).collect();
        let links = (0..ways)
            .map(|way| OrderLink {
                prev: way.checked_sub(1),
                next: (way + 1 < ways).then_some(way + 1),
            })
            .collect();
        Self {
            index,
            entries,
            links,
            head: 0,
            tail: ways - 1,
        }
    }

    /// Creates set `index` holding one valid block per counter in `rrpvs`.
    ///
    /// Way `w` gets tag `w` and counter `rrpvs[w]`; the order list is `0..ways`.
    /// Useful for restoring a snapshot of replacement state.
    ///
    /// # Panics
    ///
    /// Panics if `rrpvs` is empty or any value exceeds [`RRPV_MAX`](super::entry::RRPV_MAX).
    pub fn with_rrpvs(index: usize, rrpvs: &[u8]) -> Self {
        let mut set = Self::new(index, rrpvs.len());
        for (entry, &rrpv) in set.entries.iter_mut().zip(rrpvs) {
            entry.tag = entry.way() as u64;
            entry.valid = true;
            entry.set_rrpv(rrpv);
        }
        set
    }

    /// Returns the index of this set.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of ways (associativity).
    #[inline(always)]
    pub fn ways(&self) -> usize {
        self.entries.len()
    }

    /// Returns the entries indexed by way.
    #[inline(always)]
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Returns the entries indexed by way, mutably.
    ///
    /// Way numbers are fixed, so callers may rewrite any field but the way.
    #[inline(always)]
    pub fn entries_mut(&mut self) -> &mut [CacheEntry] {
        &mut self.entries
    }

    /// Returns the entry at `way`.
    #[inline(always)]
    pub fn entry(&self, way: usize) -> &CacheEntry {
        &self.entries[way]
    }

    /// Returns the entry at `way`, mutably.
    #[inline(always)]
    pub fn entry_mut(&mut self, way: usize) -> &mut CacheEntry {
        &mut self.entries[way]
    }

    /// Returns the way holding `tag` in the given security domain, if any.
    pub fn find(&self, tag: u64, secure: bool) -> Option<usize> {
        self.entries.iter().position(|e| e.matches(tag, secure))
    }

    /// Way at the head of the order list.
    #[inline(always)]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Way at the tail of the order list.
    #[inline(always)]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    /// Moves `way` to the head of the order list.
    pub fn move_to_head(&mut self, way: usize) {
        if way == self.head {
            return;
        }
        self.detach(way);
        self.attach_head(way);
    }

    /// Moves `way` to the tail of the order list.
    pub fn move_to_tail(&mut self, way: usize) {
        if way == self.tail {
            return;
        }
        self.detach(way);
        self.attach_tail(way);
    }

    /// Iterates way indices from head to tail.
    pub fn order(&self) -> OrderIter<'_> {
        OrderIter {
            set: self,
            next: Some(self.head),
        }
    }

    /// Iterates way indices from tail to head.
    pub fn order_rev(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.tail), |&way| self.links[way].prev)
    }

    /// Returns `true` if the order list holds every way exactly once and
    /// forward and backward links agree.
    pub fn order_is_consistent(&self) -> bool {
        let ways = self.ways();
        let mut seen = vec![false; ways];
        let mut prev = None;
        let mut current = Some(self.head);
        let mut count = 0;

        while let Some(way) = current {
            if way >= ways || seen[way] || self.links[way].prev != prev {
                return false;
            }
            seen[way] = true;
            count += 1;
            prev = Some(way);
            current = self.links[way].next;
        }

        count == ways && prev == Some(self.tail)
    }

    /// Unlinks `way`. Caller must re-attach it and must not pass a lone way
    /// (a one-way set is always both head and tail, so it never gets here).
    fn detach(&mut self, way: usize) {
        let OrderLink { prev, next } = self.links[way];

        match prev {
            Some(p) => self.links[p].next = next,
            None => {
                if let Some(n) = next {
                    self.head = n;
                }
            }
        }
        match next {
            Some(n) => self.links[n].prev = prev,
            None => {
                if let Some(p) = prev {
                    self.tail = p;
                }
            }
        }

        self.links[way] = OrderLink::default();
    }

    fn attach_head(&mut self, way: usize) {
        let old_head = self.head;
        self.links[way] = OrderLink {
            prev: None,
            next: Some(old_head),
        };
        self.links[old_head].prev = Some(way);
        self.head = way;
    }

    fn attach_tail(&mut self, way: usize) {
        let old_tail = self.tail;
        self.links[way] = OrderLink {
            prev: Some(old_tail),
            next: None,
        };
        self.links[old_tail].next = Some(way);
        self.tail = way;
    }
}

/// Head-to-tail iterator over the ways of a [`CacheSet`].
#[derive(Debug)]
pub struct OrderIter<'a> {
    set: &'a CacheSet,
    next: Option<usize>,
}

impl Iterator for OrderIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let way = self.next?;
        self.next = self.set.links[way].next;
        Some(way)
    }
}

impl fmt::Display for CacheSet {
    /// Prints entries in order-list order as `way:tag:rrpv`, `-` for invalid tags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set {:#x} [", self.index)?;
        for (i, way) in self.order().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let e = &self.entries[way];
            if e.valid {
                write!(f, "{way}:{:#x}:{}", e.tag, e.rrpv())?;
            } else {
                write!(f, "{way}:-:{}", e.rrpv())?;
            }
        }
        f.write_str("]")
    }
}
