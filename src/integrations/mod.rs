//! Collaborators that share the page with the gate.

pub mod diagrams;
