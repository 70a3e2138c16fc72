//! advtrack-core - domain model, completion math and storage for advtrack
//!
//! Advancements belong to one of five fixed tabs. Tab and world completion
//! percentages and each advancement's availability are derived from the
//! advancements' completion flags by [`calculator::recompute`] and written
//! back through an [`AdvancementStore`].

pub mod calculator;
pub mod model;
pub mod seed;
pub mod signup;
pub mod storage;

pub use calculator::{
    AdvancementState, Category, CompletionPercentages, CompletionTally, Recomputation,
    WORLD_TARGET,
};
pub use model::{Advancement, NewAdvancement, NewTab, NewUser, ParentLink, Tab, World};
pub use signup::{SignupError, SignupForm, SignupRequest, hash_password};
pub use storage::{AdvancementStore, StoreError, TursoStore};
