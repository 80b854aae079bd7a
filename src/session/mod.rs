/*!
 * Reader session module.
 *
 * This module provides:
 * - The reader session that owns the document and its derived pages
 * - Commands, events and view snapshots exchanged with a reader surface
 * - The observer hook notified after every change
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::ReaderSession;
pub use models::{
    ReaderCommand, ReaderEvent, ReaderObserver, ReaderSettings, ReaderView, ReadingScope,
};
