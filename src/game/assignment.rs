use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::Rng;
use serde::{Serialize, Deserialize};

/// One of the two teams a drawn person can be sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Boom,
    Pam,
}

impl Bucket {
    pub fn label(self) -> &'static str {
        match self {
            Bucket::Boom => "BOOM",
            Bucket::Pam => "PAM",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "boom" | "a" => Ok(Bucket::Boom),
            "pam" | "b" => Ok(Bucket::Pam),
            other => Err(format!("unknown team '{}', expected boom or pam", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn(usize),
    /// Nothing left to draw
    PoolEmpty,
    /// A drawn person is still waiting for a team
    AlreadyPending(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    Assigned { index: usize, bucket: Bucket },
    NothingPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// `index` left `bucket` and is pending again. A record that was pending
    /// before the undo went back to the pool and is reported as `abandoned`.
    Restored {
        index: usize,
        bucket: Bucket,
        abandoned: Option<usize>,
    },
    NothingToUndo,
}

/// Draw/assign/undo bookkeeping over roster indices.
///
/// Every index `0..len` lives in exactly one of: the unassigned pool, `current`,
/// the BOOM bucket or the PAM bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentState {
    len: usize,
    unassigned: Vec<usize>,
    current: Option<usize>,
    boom: Vec<usize>,
    pam: Vec<usize>,
    history: Vec<(usize, Bucket)>,
}

impl AssignmentState {
    /// Fresh state for a roster of `len` people, everyone unassigned
    pub fn new(len: usize) -> Self {
        AssignmentState {
            len,
            unassigned: (0..len).collect(),
            current: None,
            boom: Vec::new(),
            pam: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = AssignmentState::new(self.len);
        debug!("assignment state reset ({} people)", self.len);
    }

    /// Picks a uniformly random unassigned index and makes it current
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DrawOutcome {
        if let Some(pending) = self.current {
            return DrawOutcome::AlreadyPending(pending);
        }
        if self.unassigned.is_empty() {
            return DrawOutcome::PoolEmpty;
        }

        let pos = rng.gen_range(0..self.unassigned.len());
        let index = self.unassigned.swap_remove(pos);
        self.current = Some(index);
        debug!("drew {} ({} left in pool)", index, self.unassigned.len());
        DrawOutcome::Drawn(index)
    }

    /// Sends the current record to `bucket` and records it for undo
    pub fn assign(&mut self, bucket: Bucket) -> AssignOutcome {
        let Some(index) = self.current.take() else {
            return AssignOutcome::NothingPending;
        };

        self.bucket_mut(bucket).push(index);
        self.history.push((index, bucket));
        debug!("assigned {} to {}", index, bucket);
        AssignOutcome::Assigned { index, bucket }
    }

    /// Reverts the latest committed assignment, re-arming that record as current
    pub fn undo(&mut self) -> UndoOutcome {
        let Some((index, bucket)) = self.history.pop() else {
            return UndoOutcome::NothingToUndo;
        };

        let members = self.bucket_mut(bucket);
        if let Some(pos) = members.iter().rposition(|&i| i == index) {
            members.remove(pos);
        }

        let abandoned = self.current.replace(index);
        if let Some(pending) = abandoned {
            self.unassigned.push(pending);
        }
        debug!("undid {} from {} (abandoned: {:?})", index, bucket, abandoned);
        UndoOutcome::Restored { index, bucket, abandoned }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<usize> {
        match bucket {
            Bucket::Boom => &mut self.boom,
            Bucket::Pam => &mut self.pam,
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> &[usize] {
        match bucket {
            Bucket::Boom => &self.boom,
            Bucket::Pam => &self.pam,
        }
    }

    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[cfg(test)]
    pub fn history(&self) -> &[(usize, Bucket)] {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// True when every index is in exactly one place and history matches the buckets
    pub fn partition_holds(&self) -> bool {
        let mut seen = vec![0u8; self.len];
        let places = self
            .unassigned
            .iter()
            .chain(self.current.iter())
            .chain(self.boom.iter())
            .chain(self.pam.iter());
        for &index in places {
            match seen.get_mut(index) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
        seen.iter().all(|&count| count == 1) && self.history.len() == self.boom.len() + self.pam.len()
    }
}
