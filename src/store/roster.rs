//! In-document entrant repository.

use super::PlayerRepository;
use crate::models::{Entrant, EntrantId, TournamentError};
use serde::{Deserialize, Serialize};

/// Entrants in admission order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    entrants: Vec<Entrant>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entrant> {
        self.entrants.iter()
    }

    /// Borrowing lookup (the trait's `get` returns an owned copy).
    pub fn entrant(&self, id: EntrantId) -> Result<&Entrant, TournamentError> {
        self.entrants
            .iter()
            .find(|e| e.id == id)
            .ok_or(TournamentError::UnknownEntrant(id))
    }

    pub(crate) fn entrant_mut(&mut self, id: EntrantId) -> Result<&mut Entrant, TournamentError> {
        self.entrants
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(TournamentError::UnknownEntrant(id))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Entrant> {
        let name = name.trim();
        self.entrants
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Display name, or the id if the entrant is unknown.
    pub fn name_of(&self, id: EntrantId) -> String {
        self.entrant(id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Entrants ordered by current rating, highest first (ties keep admission order).
    pub fn by_rating(&self) -> Vec<&Entrant> {
        let mut sorted: Vec<&Entrant> = self.entrants.iter().collect();
        sorted.sort_by(|a, b| b.current_rating.cmp(&a.current_rating));
        sorted
    }
}

impl PlayerRepository for Roster {
    fn get(&self, id: EntrantId) -> Result<Entrant, TournamentError> {
        self.entrant(id).cloned()
    }

    fn list(&self, predicate: &dyn Fn(&Entrant) -> bool) -> Vec<Entrant> {
        self.entrants
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    fn create(&mut self, name: &str) -> Result<Entrant, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }
        if self.find_by_name(name).is_some() {
            return Err(TournamentError::DuplicateName(name.to_string()));
        }
        let entrant = Entrant::new(name);
        self.entrants.push(entrant.clone());
        Ok(entrant)
    }

    fn update(&mut self, entrant: Entrant) -> Result<(), TournamentError> {
        let slot = self.entrant_mut(entrant.id)?;
        *slot = entrant;
        Ok(())
    }
}
