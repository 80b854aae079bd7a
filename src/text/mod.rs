/*!
 * Text engine for reading practice.
 *
 * This module provides:
 * - The document model and its loaders (`document`)
 * - Tradition-aware selection of groups and verse text (`resolver`)
 * - Tokenization into words, whitespace and group markers (`tokenizer`)
 * - Pagination and page navigation (`pagination`)
 * - Practice-script derivation from marked source text (`practice`)
 * - Memoisation of token streams (`cache`)
 */

pub mod cache;
pub mod document;
pub mod pagination;
pub mod practice;
pub mod resolver;
pub mod tokenizer;

// Re-export main types
pub use cache::TokenCache;
pub use document::{Citation, Document, Tradition, Verse, VerseGroup};
pub use pagination::{Page, PageState, PageUnit, Paginator};
pub use resolver::{ResolvedReading, TextChoice, VersionResolver};
pub use tokenizer::{Token, Tokenizer};
