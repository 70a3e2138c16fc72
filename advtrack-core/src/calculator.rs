//! Completion and availability computation
//!
//! Everything here is a pure function of the advancement rows. Storage reads
//! the rows, calls [`recompute`], and writes the result back in a single
//! transaction so percentages and availability always come from the same
//! snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Total number of advancements across all tabs; the world denominator.
pub const WORLD_TARGET: u32 = 110;

/// The fixed advancement tabs and their target counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Minecraft,
    Nether,
    End,
    Adventure,
    Husbandry,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Minecraft,
        Category::Nether,
        Category::End,
        Category::Adventure,
        Category::Husbandry,
    ];

    /// Map a `tab_id` column value to its category
    pub fn from_tab_id(tab_id: i64) -> Option<Self> {
        match tab_id {
            1 => Some(Category::Minecraft),
            2 => Some(Category::Nether),
            3 => Some(Category::End),
            4 => Some(Category::Adventure),
            5 => Some(Category::Husbandry),
            _ => None,
        }
    }

    pub fn tab_id(self) -> i64 {
        match self {
            Category::Minecraft => 1,
            Category::Nether => 2,
            Category::End => 3,
            Category::Adventure => 4,
            Category::Husbandry => 5,
        }
    }

    /// Number of advancements the tab holds when fully completed
    pub fn target(self) -> u32 {
        match self {
            Category::Minecraft => 16,
            Category::Nether => 24,
            Category::End => 9,
            Category::Adventure => 35,
            Category::Husbandry => 26,
        }
    }

    /// Display name used when seeding the tab table
    pub fn name(self) -> &'static str {
        match self {
            Category::Minecraft => "Minecraft",
            Category::Nether => "The Nether",
            Category::End => "The End",
            Category::Adventure => "Adventure",
            Category::Husbandry => "Husbandry",
        }
    }

    fn index(self) -> usize {
        (self.tab_id() - 1) as usize
    }
}

/// Columns of an advancement row that drive the computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvancementState {
    pub id: i64,
    pub tab_id: i64,
    pub is_completed: bool,
    pub parent_id: Option<i64>,
}

/// Raw completed counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionTally {
    /// Every completed advancement, whatever its tab
    pub world: u32,
    per_category: [u32; 5],
}

impl CompletionTally {
    pub fn category(&self, category: Category) -> u32 {
        self.per_category[category.index()]
    }
}

/// Normalized completion percentages. Values above 100 are possible when a
/// tab holds more completed rows than its fixed target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionPercentages {
    pub world: f64,
    categories: [f64; 5],
}

impl CompletionPercentages {
    pub fn category(&self, category: Category) -> f64 {
        self.categories[category.index()]
    }

    /// `(tab_id, percentage)` for every fixed tab
    pub fn tabs(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        Category::ALL
            .into_iter()
            .map(|c| (c.tab_id(), self.category(c)))
    }
}

/// Output of a full recomputation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Recomputation {
    pub percentages: CompletionPercentages,
    /// `(advancement id, is_available)` for every input row, in input order
    pub availability: Vec<(i64, bool)>,
}

/// Count completed advancements per category and overall
pub fn tally<'a, I>(rows: I) -> CompletionTally
where
    I: IntoIterator<Item = &'a AdvancementState>,
{
    let mut tally = CompletionTally::default();
    for row in rows.into_iter().filter(|r| r.is_completed) {
        tally.world += 1;
        if let Some(category) = Category::from_tab_id(row.tab_id) {
            tally.per_category[category.index()] += 1;
        }
    }
    tally
}

/// Divide each count by its fixed target and scale to a percentage
pub fn percentages(tally: &CompletionTally) -> CompletionPercentages {
    let mut categories = [0.0; 5];
    for category in Category::ALL {
        categories[category.index()] = percent(tally.category(category), category.target());
    }
    CompletionPercentages {
        world: percent(tally.world, WORLD_TARGET),
        categories,
    }
}

fn percent(count: u32, target: u32) -> f64 {
    count as f64 / target as f64 * 100.0
}

/// Derive availability for every row from its parent's completion flag.
///
/// A row without a parent is available. A row whose parent resolves is
/// available iff the parent is completed. A parent id that does not resolve
/// to any row counts as an incomplete parent.
pub fn availability(rows: &[AdvancementState]) -> Vec<(i64, bool)> {
    let completed: HashMap<i64, bool> = rows.iter().map(|r| (r.id, r.is_completed)).collect();

    rows.iter()
        .map(|row| {
            let available = match row.parent_id {
                None => true,
                Some(parent) => completed.get(&parent).copied().unwrap_or(false),
            };
            (row.id, available)
        })
        .collect()
}

/// Run the full pass: percentages and availability from one snapshot
pub fn recompute(rows: &[AdvancementState]) -> Recomputation {
    Recomputation {
        percentages: percentages(&tally(rows)),
        availability: availability(rows),
    }
}
