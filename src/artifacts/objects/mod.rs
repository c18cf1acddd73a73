//! Object types and operations
//!
//! All repository content is stored as immutable, content-addressed objects:
//!
//! - **Table**: Column names and rows of one table
//! - **Root**: The set of tables in a snapshot (name -> table id)
//! - **Commit**: Snapshot metadata (root, parents, height, author, message)
//!
//! All objects implement serialization/deserialization for the object format:
//! `<type> <size>\0<content>`

pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod root_tree;
pub mod table;

/// Length of an object id in its base32 text form
pub const OBJECT_ID_LENGTH: usize = 32;

/// Base32 alphabet used to render object ids
pub const OBJECT_ID_ALPHABET: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";
