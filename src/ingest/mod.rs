//! Document ingestion
//!
//! Reads a user-selected file, guesses its media type and encodes it into
//! the base64 payload sent inline to the model.

pub mod describe;
pub mod load;
pub mod mime;
pub mod schema;

pub use describe::{describe_file, format_size};
pub use load::{encode_bytes, load_file};
pub use schema::UploadedFile;
