/*!
 * # egrul-resolver
 *
 * A Rust library for resolving the ultimate beneficial owners of a legal
 * entity through the EGRUL corporate registry.
 *
 * ## Features
 *
 * - Four-step asynchronous extract protocol against the registry
 *   (search, poll, extract request, download)
 * - Bounded polling with a configurable interval and attempt budget
 * - Heuristic line parser for the registry's disclosure documents
 * - Recursive, cycle-safe descent through organization owners
 * - Query by tax identifier or free-text entity name
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `registry`: Registry job client and the fetcher seam:
 *   - `registry::client`: HTTP client for the extract protocol
 *   - `registry::mock`: Scripted fetcher for tests
 * - `extract`: Document-to-line-sequence extraction
 * - `owner_parser`: Positional owner-record parsing
 * - `resolver`: Recursive beneficial-ownership resolution
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod extract;
pub mod owner_parser;
pub mod registry;
pub mod resolver;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ExtractError, RegistryError};
pub use extract::{LineExtractor, PdfLineExtractor, PlainTextExtractor};
pub use owner_parser::{OwnerKind, OwnerRecord};
pub use registry::{DocumentFetcher, RegistryClient};
pub use resolver::OwnershipResolver;
