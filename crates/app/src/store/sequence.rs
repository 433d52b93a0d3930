//! Per-collection request sequencing.
//!
//! Every reload takes a ticket; only the most recently issued ticket for a
//! collection may publish its result.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::{Mutex, PoisonError},
};

use rustc_hash::FxHashMap;

/// Server-backed collection held in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Menu categories
    Categories,

    /// Menu products
    Products,

    /// Admin order list
    Orders,

    /// Promotions
    Promotions,
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Collection::Categories => "categories",
            Collection::Products => "products",
            Collection::Orders => "orders",
            Collection::Promotions => "promotions",
        })
    }
}

/// Claim on the right to publish one reload result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    pub(crate) collection: Collection,
    pub(crate) sequence: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    latest: Mutex<FxHashMap<Collection, u64>>,
}

impl Sequencer {
    pub(crate) fn issue(&self, collection: Collection) -> Ticket {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        let sequence = latest.entry(collection).or_default();

        *sequence += 1;

        Ticket {
            collection,
            sequence: *sequence,
        }
    }

    pub(crate) fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ticket.collection)
            .is_some_and(|sequence| *sequence == ticket.sequence)
    }
}
