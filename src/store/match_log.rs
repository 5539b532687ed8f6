//! In-document match log.

use super::MatchLog;
use crate::models::{EntrantId, MatchId, MatchRecord, StageTag};
use serde::{Deserialize, Serialize};

/// Which matches a query returns. Empty filter = all.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchFilter {
    pub entrant: Option<EntrantId>,
    pub stage: Option<StageTag>,
}

impl MatchFilter {
    fn accepts(&self, record: &MatchRecord) -> bool {
        self.entrant.map_or(true, |id| record.involves(id))
            && self.stage.map_or(true, |stage| record.stage == Some(stage))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrder {
    #[default]
    Oldest,
    Newest,
}

/// Matches in the order they were reported.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchHistory {
    records: Vec<MatchRecord>,
}

impl MatchHistory {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&MatchRecord> {
        self.records.last()
    }
}

impl MatchLog for MatchHistory {
    fn append(&mut self, record: MatchRecord) -> MatchId {
        let id = record.id;
        self.records.push(record);
        id
    }

    fn query(&self, filter: &MatchFilter, order: MatchOrder) -> Vec<MatchRecord> {
        let matching = self.records.iter().filter(|r| filter.accepts(r)).cloned();
        match order {
            MatchOrder::Oldest => matching.collect(),
            MatchOrder::Newest => {
                let mut v: Vec<MatchRecord> = matching.collect();
                v.reverse();
                v
            }
        }
    }
}
