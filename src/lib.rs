//! # Utility Site
//!
//! A small company website for a utility provider: a home page, official
//! documents with inline PDF preview and download, a photo gallery and a
//! contacts page. Everything a visitor sees comes from one `config.toml` plus
//! two folders of files next to it.
//!
//! ```text
//! site/
//! ├── config.toml          # company, theme, menu, contacts, documents, limits
//! ├── documents/           # license1.pdf … tariff.pdf
//! └── photos/              # gallery images (png / jpg / jpeg by default)
//! ```
//!
//! # Request Cycle
//!
//! Each render is a full, independent pass:
//!
//! ```text
//! config::load  →  theme  →  nav (session state)  →  view  →  footer
//! ```
//!
//! Nothing is cached between renders: editing the config or dropping a file
//! into a folder shows up on the next page load.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading with stock defaults, validation, stock config text |
//! | [`theme`] | Colour tokens, base stylesheet and style variants |
//! | [`nav`] | Menu model, per-session navigation state, sidebar and quick navigation |
//! | [`documents`] | Document descriptors, download bytes, inline preview or size warning |
//! | [`gallery`] | Photo listing, lookup and the gallery view |
//! | [`contacts`] | Contacts view, sidebar quick contacts, footer |
//! | [`render`] | Page assembly and view dispatch |
//! | [`server`] | axum HTTP surface with cookie-held session state |
//! | [`export`] | Static copy of every view for a plain file server |
//! | [`check`] | Site inspection for the `check` command |
//! | [`output`] | CLI output formatting for `check` and `export` |
//!
//! # Design Decisions
//!
//! ## Config Never Breaks the Site
//!
//! The user's config is merged over the stock defaults and then validated. A
//! render never fails because of the config: a missing file means defaults,
//! and a malformed one means defaults plus a warning in the log. The `check`
//! command is where broken configs are reported.
//!
//! ## Labels Are Identity, Views Are Kinds
//!
//! The session remembers the selected menu *label*. Which view a label opens
//! comes from its `page` kind, so relabelling the menu never rewires views.
//! A stored label that no longer exists resets to the first menu item.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Config text is
//! escaped on interpolation; only the Markdown company description is
//! inserted as HTML.

pub mod check;
pub mod config;
pub mod contacts;
pub mod documents;
pub mod export;
pub mod gallery;
pub mod nav;
pub mod output;
pub mod render;
pub mod server;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
