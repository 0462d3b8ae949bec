pub mod index;
pub mod ranking;
pub mod registry;

pub use index::{IndexEntry, parse_category_functions, parse_function_index};
pub use ranking::{CandidateKind, RankedResult, SearchCandidate, SearchResponse, rank};
pub use registry::{
    FUNCTION_CATEGORIES, Registries, RegistryEntry, SYNTAX_TOPICS, resolve_key, resolve_topic,
};
