//! Extraction Core
//!
//! Implementations for turning raw job postings into skill sets:
//! tokenization, vocabulary matching, taxonomy loading and corpus reading.

pub mod corpus;
pub mod extractor;
pub mod taxonomy;
pub mod tokenizer;

// Re-export SPI types for implementations
pub use extract_spi::{ExtractError, Posting, Result, SkillMatcher, SkillSet, Vocabulary};

// Re-export main types
pub use corpus::{dedup_postings, parse_timestamp, read_postings, CorpusColumns, ReadReport};
pub use extractor::{extract_skills, SkillExtractor};
pub use taxonomy::{load_vocabulary, parse_taxonomy};
pub use tokenizer::tokenize;
