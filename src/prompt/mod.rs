pub mod engine;

pub use engine::{collect_answers, parse_data_pairs, PromptOptions};
