//! Linear objective state machine.
//!
//! Objectives are strictly ordered. Only the one at `current` can be satisfied;
//! everything before it is complete, nothing after it can be taken early.
//! Moving past the last objective is the success condition.

use serde::Deserialize;

use crate::sim::entity::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveKind {
    Recon,
    Destroy,
    Eliminate,
    Retrieve,
}

impl ObjectiveKind {
    /// Does a kill/pickup of `category` satisfy this kind?
    ///
    /// Recon is never satisfied by a hit; it completes through aim dwell.
    #[inline]
    pub fn accepts(self, category: Category) -> bool {
        matches!(
            (self, category),
            (Self::Destroy, Category::ExplosiveBarrel)
                | (Self::Retrieve, Category::IntelItem)
                | (Self::Eliminate, Category::PrimaryTarget)
        )
    }

    /// The entity category a hit-satisfied objective needs on the range.
    #[inline]
    pub fn target_category(self) -> Option<Category> {
        match self {
            Self::Recon => None,
            Self::Destroy => Some(Category::ExplosiveBarrel),
            Self::Eliminate => Some(Category::PrimaryTarget),
            Self::Retrieve => Some(Category::IntelItem),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Objective {
    pub id: String,
    pub kind: ObjectiveKind,
    pub description: String,
}

/// Result of offering an event to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Not the active objective's kind (or already complete).
    Ignored,
    /// Moved to `index`; `description` is the newly active objective.
    Advanced { index: usize, description: String },
    /// The last objective was satisfied.
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectiveTracker {
    objectives: Vec<Objective>,
    current: usize,
}

impl ObjectiveTracker {
    pub fn new(objectives: Vec<Objective>) -> Self {
        Self { objectives, current: 0 }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current >= self.objectives.len()
    }

    pub fn active(&self) -> Option<&Objective> {
        self.objectives.get(self.current)
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Adjudicate a kill or pickup of `category`.
    pub fn register_hit(&mut self, category: Category) -> Advance {
        match self.active() {
            Some(o) if o.kind.accepts(category) => self.advance(),
            _ => Advance::Ignored,
        }
    }

    /// Adjudicate a completed reveal.
    pub fn register_recon(&mut self) -> Advance {
        match self.active() {
            Some(o) if o.kind == ObjectiveKind::Recon => self.advance(),
            _ => Advance::Ignored,
        }
    }

    fn advance(&mut self) -> Advance {
        self.current += 1;
        match self.objectives.get(self.current) {
            Some(next) => Advance::Advanced {
                index: self.current,
                description: next.description.clone(),
            },
            None => Advance::Completed,
        }
    }
}
