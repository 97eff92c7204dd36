pub mod fields;
pub mod honeypot;
pub mod metadata;
pub mod parser;
pub mod pipeline;
pub mod sanitize;

pub use fields::Submission;
pub use pipeline::Outcome;
