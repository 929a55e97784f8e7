//! folio: a terminal portfolio viewer with scroll-spy section navigation.
//!
//! A portfolio is a markdown document whose top-level headings are page sections. The page is
//! laid out into a tall scrollable document under a fixed navigation header, and the header
//! highlight follows whichever section the reader is currently looking at.

pub mod app_state;
pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod layout;
pub mod listeners;
pub mod logging;
pub mod observer;
pub mod scroll;
pub mod section;
pub mod tracker;
pub mod ui;
pub mod viewport;
