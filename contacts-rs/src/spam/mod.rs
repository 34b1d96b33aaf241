//! Rule-based promotional/spam contact classification

mod classifier;
mod types;

pub use classifier::SpamClassifier;
pub use types::{BehaviorSignal, CategoryPattern, SpamVerdict};
