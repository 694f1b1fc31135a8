//! IMF Differ UI - composition tree model and egui widgets
//!
//! Provides:
//! - An arena tree projection of a composition with item-view style lookups
//! - A collapsible tree view rendering that projection
//! - The application palette

pub mod cpl_model;
pub mod cpl_view;
pub mod theme;

pub use cpl_model::{Column, CplTreeModel, NodeId, NodeKind};
pub use cpl_view::CplTreeView;
pub use theme::Theme;
