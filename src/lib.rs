/*!
 * # tikkun - reading practice for scripture portions
 *
 * A Rust library that prepares scripture readings for practice: each word
 * is shown in practice script (consonants only) and carries the fully
 * marked source word as a hint.
 *
 * ## Features
 *
 * - Load reading documents with verse groups, a supplementary reading and
 *   per-tradition alternates
 * - Resolve the text a given tradition reads, falling back per field
 * - Tokenize verses into words, whitespace and group markers
 * - Paginate token streams by tokens or by words
 * - Render chapter, verse and page numbers as traditional numerals
 * - Derive practice script from fully marked text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `text`: The text engine:
 *   - `text::document`: Document model, loader and book manifest
 *   - `text::resolver`: Tradition-aware text selection
 *   - `text::tokenizer`: Word-level tokenization
 *   - `text::pagination`: Pages and page navigation
 *   - `text::practice`: Practice-script derivation
 *   - `text::cache`: Token stream memoisation
 * - `session`: Reader session driven by discrete commands
 * - `numerals`: Traditional numeral encoding
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod numerals;
pub mod session;
pub mod text;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ConfigError, DocumentError, TraditionError};
pub use session::{ReaderCommand, ReaderSession, ReaderView};
pub use text::{Document, PageUnit, Token, Tradition};
