//! # In-Memory Adapters
//!
//! Backs the storage and directory ports with process-local maps.
//!
//! The progress store keeps one `Mutex<PlayerLedger>` per player; holding
//! that mutex across classify/append/update is what makes `commit_scan`
//! indivisible. Different players touch different mutexes, so there is no
//! cross-player coordination. Poisoned locks surface as
//! `GameError::Transient`.

use crate::domain::{GameError, PlayerLedger, PuzzleRecord, ScanCommit};
use crate::ports::{PlayerDirectory, ProgressStore, PuzzleVault};
use hunt_types::{PlayerId, PlayerSummary, ProgressAggregate, PuzzleId, ScanEvent, Timestamp};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// In-memory implementation of [`ProgressStore`].
pub struct MemoryProgressStore {
    ledgers: RwLock<HashMap<PlayerId, Arc<Mutex<PlayerLedger>>>>,
}

impl MemoryProgressStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            ledgers: RwLock::new(HashMap::new()),
        }
    }

    /// Fetches the player's ledger handle, creating it on first use.
    fn handle(&self, player: PlayerId) -> Result<Arc<Mutex<PlayerLedger>>, GameError> {
        {
            let ledgers = self
                .ledgers
                .read()
                .map_err(|_| GameError::Transient("ledger map lock poisoned".into()))?;
            if let Some(ledger) = ledgers.get(&player) {
                return Ok(Arc::clone(ledger));
            }
        }
        let mut ledgers = self
            .ledgers
            .write()
            .map_err(|_| GameError::Transient("ledger map lock poisoned".into()))?;
        Ok(Arc::clone(ledgers.entry(player).or_insert_with(|| {
            Arc::new(Mutex::new(PlayerLedger::new(player)))
        })))
    }

    /// Fetches the player's ledger handle without creating one.
    fn existing(&self, player: PlayerId) -> Result<Option<Arc<Mutex<PlayerLedger>>>, GameError> {
        let ledgers = self
            .ledgers
            .read()
            .map_err(|_| GameError::Transient("ledger map lock poisoned".into()))?;
        Ok(ledgers.get(&player).map(Arc::clone))
    }
}

impl Default for MemoryProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn commit_scan(
        &self,
        player: PlayerId,
        puzzle: &PuzzleRecord,
        now: Timestamp,
    ) -> Result<ScanCommit, GameError> {
        let handle = self.handle(player)?;
        let mut ledger = handle
            .lock()
            .map_err(|_| GameError::Transient("player ledger lock poisoned".into()))?;
        Ok(ledger.record_scan(puzzle.id, puzzle.points, now))
    }

    fn aggregate_for(&self, player: PlayerId) -> Result<Option<ProgressAggregate>, GameError> {
        match self.existing(player)? {
            None => Ok(None),
            Some(handle) => {
                let ledger = handle
                    .lock()
                    .map_err(|_| GameError::Transient("player ledger lock poisoned".into()))?;
                Ok(ledger.aggregate().cloned())
            }
        }
    }

    fn complete_run(
        &self,
        player: PlayerId,
        now: Timestamp,
    ) -> Result<ProgressAggregate, GameError> {
        match self.existing(player)? {
            None => Err(GameError::NoProgress(player)),
            Some(handle) => {
                let mut ledger = handle
                    .lock()
                    .map_err(|_| GameError::Transient("player ledger lock poisoned".into()))?;
                ledger.complete(now)
            }
        }
    }

    fn scan_history(&self, player: PlayerId) -> Result<Vec<ScanEvent>, GameError> {
        match self.existing(player)? {
            None => Ok(Vec::new()),
            Some(handle) => {
                let ledger = handle
                    .lock()
                    .map_err(|_| GameError::Transient("player ledger lock poisoned".into()))?;
                Ok(ledger.events().to_vec())
            }
        }
    }

    fn all_aggregates(&self) -> Result<Vec<(PlayerId, ProgressAggregate)>, GameError> {
        let handles: Vec<(PlayerId, Arc<Mutex<PlayerLedger>>)> = {
            let ledgers = self
                .ledgers
                .read()
                .map_err(|_| GameError::Transient("ledger map lock poisoned".into()))?;
            ledgers
                .iter()
                .map(|(player, handle)| (*player, Arc::clone(handle)))
                .collect()
        };

        let mut rows = Vec::with_capacity(handles.len());
        for (player, handle) in handles {
            let ledger = handle
                .lock()
                .map_err(|_| GameError::Transient("player ledger lock poisoned".into()))?;
            if let Some(aggregate) = ledger.aggregate() {
                rows.push((player, aggregate.clone()));
            }
        }
        Ok(rows)
    }
}

/// In-memory implementation of [`PuzzleVault`].
///
/// Stands in for the admin collaborator's record store: insertion seals
/// content, so a key and its blob are always created together.
pub struct MemoryPuzzleVault {
    puzzles: RwLock<BTreeMap<PuzzleId, PuzzleRecord>>,
    next_id: AtomicU64,
}

impl MemoryPuzzleVault {
    /// Creates an empty vault.
    pub fn new() -> Self {
        Self {
            puzzles: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seals `plaintext` under a fresh key and stores a new active record.
    ///
    /// # Errors
    ///
    /// `GameError::Internal` for a zero point value or a sealing failure.
    pub fn insert_sealed(
        &self,
        title: &str,
        plaintext: &str,
        solution: &str,
        points: u64,
        sequence: u32,
    ) -> Result<PuzzleRecord, GameError> {
        if points == 0 {
            return Err(GameError::Internal("puzzle point value must be positive".into()));
        }
        let id = PuzzleId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = PuzzleRecord::sealed_new(id, title, plaintext, solution, points, sequence)
            .map_err(|e| GameError::Internal(format!("sealing failed: {}", e)))?;
        self.insert(record.clone())?;
        Ok(record)
    }

    /// Stores a prebuilt record, replacing any record with the same id.
    pub fn insert(&self, record: PuzzleRecord) -> Result<(), GameError> {
        let mut puzzles = self
            .puzzles
            .write()
            .map_err(|_| GameError::Transient("vault lock poisoned".into()))?;
        puzzles.insert(record.id, record);
        Ok(())
    }

    /// Flips a record's active flag. Returns false if the id is unknown.
    pub fn set_active(&self, id: PuzzleId, active: bool) -> Result<bool, GameError> {
        let mut puzzles = self
            .puzzles
            .write()
            .map_err(|_| GameError::Transient("vault lock poisoned".into()))?;
        match puzzles.get_mut(&id) {
            Some(record) => {
                record.active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for MemoryPuzzleVault {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleVault for MemoryPuzzleVault {
    fn puzzle(&self, id: PuzzleId) -> Result<Option<PuzzleRecord>, GameError> {
        let puzzles = self
            .puzzles
            .read()
            .map_err(|_| GameError::Transient("vault lock poisoned".into()))?;
        Ok(puzzles.get(&id).cloned())
    }

    fn active_count(&self) -> Result<u64, GameError> {
        let puzzles = self
            .puzzles
            .read()
            .map_err(|_| GameError::Transient("vault lock poisoned".into()))?;
        Ok(puzzles.values().filter(|r| r.active).count() as u64)
    }
}

/// In-memory implementation of [`PlayerDirectory`].
pub struct MemoryPlayerDirectory {
    players: RwLock<HashMap<PlayerId, PlayerSummary>>,
}

impl MemoryPlayerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
        }
    }

    /// Registers (or replaces) a player's display attributes.
    pub fn register(&self, summary: PlayerSummary) -> Result<(), GameError> {
        let mut players = self
            .players
            .write()
            .map_err(|_| GameError::Transient("directory lock poisoned".into()))?;
        players.insert(summary.id, summary);
        Ok(())
    }
}

impl Default for MemoryPlayerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerDirectory for MemoryPlayerDirectory {
    fn summary(&self, player: PlayerId) -> Result<Option<PlayerSummary>, GameError> {
        let players = self
            .players
            .read()
            .map_err(|_| GameError::Transient("directory lock poisoned".into()))?;
        Ok(players.get(&player).cloned())
    }
}
