//! Draw session: prizes, participants and the winners of each prize
//!
//! All state sits behind one mutex. Every public method holds the lock for
//! its whole duration; helpers on [`SessionState`] assume the lock is already
//! held and never take it again.
//!
//! Every mutation validates first and writes last, so a failed call leaves
//! the session exactly as it was.

use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::{DrawError, Result};
use crate::model::{Participant, Prize, PrizeNo, PrizeState};
use crate::persistence::{SaveData, winners_checksum};
use crate::records::{parse_participant_row, parse_prize_row};
use crate::sampling::sample_without_replacement;

/// Winners of every drawn prize, keyed by prize number
pub type WinnerMap = BTreeMap<PrizeNo, Vec<Participant>>;

/// Lock-protected session data
#[derive(Debug)]
struct SessionState {
    prizes: BTreeMap<PrizeNo, Prize>,
    /// Ordered by id so that seeded draws are reproducible
    participants: BTreeMap<String, Participant>,
    /// A key is present only once its prize has been drawn
    winners: WinnerMap,
    rng: Pcg32,
}

impl SessionState {
    fn new(rng: Pcg32) -> Self {
        Self {
            prizes: BTreeMap::new(),
            participants: BTreeMap::new(),
            winners: BTreeMap::new(),
            rng,
        }
    }

    /// Participants not currently winning any prize
    fn available(&self) -> Vec<Participant> {
        let taken: HashSet<&str> = self
            .winners
            .values()
            .flatten()
            .map(|w| w.id.as_str())
            .collect();

        self.participants
            .values()
            .filter(|p| !taken.contains(p.id.as_str()))
            .cloned()
            .collect()
    }

    /// Look up a prize that can hold winners
    fn drawable_prize(&self, no: PrizeNo) -> Result<&Prize> {
        let prize = self.prizes.get(&no).ok_or(DrawError::UnknownPrize(no))?;
        if prize.amount < 1 {
            return Err(DrawError::InvalidPrizeAmount {
                no,
                amount: prize.amount,
            });
        }
        Ok(prize)
    }

    /// Sample up to `count` winners from the available pool
    fn pick(&mut self, count: i64) -> Result<Vec<Participant>> {
        let candidates = self.available();
        if candidates.is_empty() {
            return Err(DrawError::NoAvailableParticipants);
        }
        Ok(sample_without_replacement(&mut self.rng, candidates, count))
    }
}

/// A prize draw session
#[derive(Debug)]
pub struct DrawSession {
    name: String,
    state: Mutex<SessionState>,
}

impl DrawSession {
    /// Create an empty session with an OS-seeded generator
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, rand::random())
    }

    /// Create an empty session whose draws are reproducible from `seed`
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(SessionState::new(Pcg32::seed_from_u64(seed))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // State is written only after validation, so a poisoned lock still guards consistent data
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // === Prizes ===

    /// Insert or overwrite a prize
    pub fn set_prize(
        &self,
        no: PrizeNo,
        name: impl Into<String>,
        amount: i64,
        desc: impl Into<String>,
    ) {
        let prize = Prize::new(no, name, amount, desc);
        self.lock().prizes.insert(no, prize);
    }

    pub fn prize(&self, no: PrizeNo) -> Option<Prize> {
        self.lock().prizes.get(&no).cloned()
    }

    /// Replace every prize with the given `no, name, amount, desc` rows.
    ///
    /// The first row is a header. Nothing changes if any row is rejected.
    pub fn load_prizes<I, R, S>(&self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut prizes = BTreeMap::new();
        for row in rows.into_iter().skip(1) {
            let prize = parse_prize_row(row.as_ref())?;
            prizes.insert(prize.no, prize);
        }

        log::info!("Loaded {} prizes into session {:?}", prizes.len(), self.name);
        self.lock().prizes = prizes;
        Ok(())
    }

    /// All prizes ordered by number
    pub fn prizes(&self, descending: bool) -> Vec<Prize> {
        let state = self.lock();
        if descending {
            state.prizes.values().rev().cloned().collect()
        } else {
            state.prizes.values().cloned().collect()
        }
    }

    // === Participants ===

    /// Replace every participant with the given `id, name` rows.
    ///
    /// The first row is a header. Nothing changes if any row is rejected.
    pub fn load_participants<I, R, S>(&self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut participants = BTreeMap::new();
        for row in rows.into_iter().skip(1) {
            let participant = parse_participant_row(row.as_ref())?;
            participants.insert(participant.id.clone(), participant);
        }

        log::info!(
            "Loaded {} participants into session {:?}",
            participants.len(),
            self.name
        );
        self.lock().participants = participants;
        Ok(())
    }

    /// All participants, ascending by id
    pub fn participants(&self) -> Vec<Participant> {
        self.lock().participants.values().cloned().collect()
    }

    /// Participants who have not won any prize, ascending by id
    pub fn available_participants(&self) -> Vec<Participant> {
        self.lock().available()
    }

    // === Winners ===

    pub fn prize_state(&self, no: PrizeNo) -> PrizeState {
        if self.lock().winners.contains_key(&no) {
            PrizeState::Drawn
        } else {
            PrizeState::NotDrawn
        }
    }

    /// Winners of one prize in draw order (empty if not drawn)
    pub fn winners(&self, no: PrizeNo) -> Vec<Participant> {
        self.lock().winners.get(&no).cloned().unwrap_or_default()
    }

    /// Snapshot of every drawn prize's winners
    pub fn all_winners(&self) -> WinnerMap {
        self.lock().winners.clone()
    }

    /// Draw winners for a prize that has not been drawn yet
    pub fn draw(&self, no: PrizeNo) -> Result<Vec<Participant>> {
        let mut state = self.lock();

        let amount = state.drawable_prize(no)?.amount;
        if state.winners.contains_key(&no) {
            return Err(DrawError::AlreadyDrawn(no));
        }

        let winners = state.pick(amount)?;
        log::info!("Prize {}: drew {} of {} winners", no, winners.len(), amount);
        state.winners.insert(no, winners.clone());
        Ok(winners)
    }

    /// Remove the given participant ids from a prize's winners.
    ///
    /// Every id must be a current winner of the prize, otherwise nothing is
    /// removed. Listing an id twice counts as a mismatch.
    pub fn revoke<S: AsRef<str>>(&self, no: PrizeNo, ids: &[S]) -> Result<()> {
        let mut state = self.lock();

        state.drawable_prize(no)?;
        let current = state
            .winners
            .get(&no)
            .ok_or(DrawError::NoWinnersToRevoke(no))?;

        let mut remaining: HashSet<&str> = current.iter().map(|w| w.id.as_str()).collect();
        let mut revoked = HashSet::new();
        for id in ids {
            let id = id.as_ref();
            if !remaining.remove(id) {
                return Err(DrawError::RevokedWinnerMismatch {
                    no,
                    id: id.to_string(),
                });
            }
            revoked.insert(id.to_string());
        }

        if let Some(list) = state.winners.get_mut(&no) {
            list.retain(|w| !revoked.contains(&w.id));
        }
        log::info!("Prize {}: revoked {} winner(s)", no, revoked.len());
        Ok(())
    }

    /// Draw `extra` more winners for an already drawn prize, appended after
    /// the existing ones.
    pub fn redraw(&self, no: PrizeNo, extra: i64) -> Result<Vec<Participant>> {
        let mut state = self.lock();

        let amount = state.drawable_prize(no)?.amount;
        let current = state
            .winners
            .get(&no)
            .ok_or(DrawError::WinnersNotYetDrawn(no))?
            .len();

        let remaining = amount - current as i64;
        if extra > remaining {
            return Err(DrawError::RedrawAmountExceedsCapacity {
                no,
                requested: extra,
                remaining,
            });
        }

        let winners = state.pick(extra)?;
        log::info!("Prize {}: redrew {} winner(s)", no, winners.len());
        state
            .winners
            .entry(no)
            .or_default()
            .extend(winners.iter().cloned());
        Ok(winners)
    }

    /// Empty a prize's winners. The prize stays drawn.
    pub fn clear_winners(&self, no: PrizeNo) {
        self.lock().winners.insert(no, Vec::new());
        log::info!("Prize {}: winners cleared", no);
    }

    /// Forget every draw; all prizes become undrawn
    pub fn clear_all_winners(&self) {
        self.lock().winners.clear();
        log::info!("All winners cleared in session {:?}", self.name);
    }

    // === Persistence ===

    /// Write a checksummed snapshot of the session as JSON
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let state = self.lock();
        let data = SaveData::capture(
            &self.name,
            &state.prizes,
            &state.participants,
            &state.winners,
        );
        data.write_to(writer)?;
        log::debug!("Session {:?} saved at {}", self.name, data.last_updated);
        Ok(())
    }

    /// Replace the session contents with a saved snapshot.
    ///
    /// The winners checksum is verified before anything is replaced.
    pub fn load<R: Read>(&self, reader: R) -> Result<()> {
        let mut state = self.lock();

        let data = SaveData::read_from(reader)?;
        let winners = data.winners.unwrap_or_default();
        let computed = winners_checksum(&winners);
        if computed != data.checksum {
            log::warn!("Rejected snapshot of {:?}: checksum mismatch", data.name);
            return Err(DrawError::ChecksumMismatch {
                stored: data.checksum,
                computed,
            });
        }
        if data.name != self.name {
            log::warn!(
                "Loading snapshot named {:?} into session {:?}",
                data.name,
                self.name
            );
        }

        state.prizes = data.prizes.unwrap_or_default();
        state.participants = data.participants.unwrap_or_default();
        state.winners = winners;
        log::info!(
            "Session {:?} restored ({} prizes, {} participants, last updated {})",
            self.name,
            state.prizes.len(),
            state.participants.len(),
            data.last_updated
        );
        Ok(())
    }
}
