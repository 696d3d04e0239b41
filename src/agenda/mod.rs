//! Agenda generation
//!
//! Sends a document to the analysis model with a fixed instruction and a
//! strict JSON response schema, decodes the reply, and derives the display
//! timeline.

pub mod generate;
pub mod model;
pub mod timeline;

pub use generate::AgendaGenerator;
pub use model::{AgendaItem, AnalysisResult, Stakeholder};
pub use timeline::{derive_timeline, TimeSlot};
