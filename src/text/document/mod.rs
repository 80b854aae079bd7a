/*!
 * Document modeling for scripture readings.
 *
 * This module provides:
 * - The verse / verse group / document model and its JSON loader
 * - Tradition identifiers and per-tradition overrides
 * - The book catalogue used to move between documents
 */

pub mod manifest;
pub mod model;

// Re-export types used by other modules
pub use manifest::{Book, Manifest, ReadingEntry};
pub use model::{
    AlternateReading, Citation, Document, GroupKind, Tradition, Verse, VerseGroup, VerseVersion,
};
