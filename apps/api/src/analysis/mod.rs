// Job description analysis: normalization, keyword matching and the pipeline that ties
// them to the insight collaborator and the result store.

pub mod analyzer;
pub mod cleaner;
pub mod experience;
pub mod handlers;
pub mod skills;
pub mod vocabulary;
