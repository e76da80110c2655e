//! Model module containing data structures

mod posting;
mod vocabulary;

pub use posting::{Posting, SkillSet};
pub use vocabulary::Vocabulary;
