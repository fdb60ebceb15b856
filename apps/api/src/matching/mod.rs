// CV / job-offer matching: coverage scoring, skill-vector similarity,
// language adaptation and the adaptive fusion of the three match signals.

pub mod coverage;
pub mod fusion;
pub mod handlers;
pub mod language;
pub mod pipeline;
pub mod skill_vectors;
