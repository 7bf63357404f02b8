//! Site structure for the docview documentation server.
//!
//! This crate derives everything structural about a documentation site from
//! the filesystem, fresh on every request:
//!
//! - [`scanner`]: single-level directory listing (markdown files and
//!   subdirectories, hidden entries excluded)
//! - [`sidebar`]: recursive navigation tree build and HTML rendering
//! - [`resolver`]: URL path to on-disk markdown file resolution with
//!   directory index fallback
//! - [`breadcrumbs`]: navigation trail from site root to the current page
//! - [`name`]: filesystem names to display titles
//!
//! The docs tree is treated as read-only input. No structure is cached;
//! the tree is cheap to re-derive and caching would introduce staleness.

pub mod breadcrumbs;
pub mod name;
pub mod resolver;
pub mod scanner;
pub mod sidebar;

pub use breadcrumbs::BreadcrumbEntry;
pub use name::format_name;
pub use resolver::{ResolveError, ResolvedDocument, resolve};
pub use scanner::DirListing;
pub use sidebar::{NavKind, NavNode, escape_html};
