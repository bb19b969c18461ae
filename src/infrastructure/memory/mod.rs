//! In-process store implementing every repository trait.
//!
//! Used by `STORE_BACKEND=memory` and by the HTTP tests. Data lives only as
//! long as the process.
//!
//! Locking:
//!
//! - the mapping index sits behind a [`tokio::sync::RwLock`] that is held
//!   only long enough to look up or insert a slot
//! - each mapping's counter and click log share one [`tokio::sync::Mutex`],
//!   so a click is applied as a unit and clicks on different mappings never
//!   contend

mod accounts;
mod mappings;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::{Account, ClickEvent, PasswordResetToken, Session, UrlMapping};

/// Store holding mappings, clicks, accounts, sessions and reset tokens in
/// memory.
#[derive(Default)]
pub struct MemoryStore {
    mappings: RwLock<MappingIndex>,
    auth: RwLock<AuthTables>,
    sequences: Sequences,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default)]
struct Sequences {
    mapping: AtomicI64,
    click: AtomicI64,
    account: AtomicI64,
    session: AtomicI64,
    reset: AtomicI64,
}

impl Sequences {
    fn next(counter: &AtomicI64) -> i64 {
        counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(Default)]
struct MappingIndex {
    by_id: BTreeMap<i64, Arc<MappingSlot>>,
    by_code: HashMap<String, i64>,
}

/// One mapping plus its click log.
struct MappingSlot {
    owner_id: i64,
    entry: Mutex<MappingEntry>,
}

struct MappingEntry {
    mapping: UrlMapping,
    clicks: Vec<ClickEvent>,
}

#[derive(Default)]
struct AuthTables {
    accounts: BTreeMap<i64, Account>,
    sessions: HashMap<String, Session>,
    resets: BTreeMap<i64, PasswordResetToken>,
}
