//! InstaCats: a bundled list of cats, loaded once and presented as rows.
//!
//! The library holds everything that does not depend on a terminal:
//!
//! - [`resources`] - Resolve a `name.ext` file name inside the resource bundle
//! - [`records`] - Read and decode the bundled JSON into [`records::Record`]s
//! - [`presenter`] - Expose count/row data to a display surface and forward
//!   row selection to an external opener
//! - [`config`] - Optional `config.toml`
//! - [`util`] - Link validation and terminal text helpers
//!
//! # Example
//!
//! ```no_run
//! use instacats::presenter::{BundledRecords, ListPresenter, SystemOpener};
//! use instacats::resources::ResourceBundle;
//!
//! let bundle = ResourceBundle::new("resources");
//! let source = BundledRecords::new(&bundle, "InstaCats.json", "cats");
//!
//! let mut presenter = ListPresenter::new(SystemOpener);
//! presenter.load(&source);
//! for i in 0..presenter.count() {
//!     println!("{}", presenter.record_at(i).name);
//! }
//! ```

pub mod config;
pub mod presenter;
pub mod records;
pub mod resources;
pub mod util;
