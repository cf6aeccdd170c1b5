//! List-sync controller: location filter ⇄ remote page ⇄ rendered list.

mod cards;
mod controller;
mod debounce;
mod removal;
mod widget;

pub use cards::{ListRenderer, PostCard, post_card};
pub use controller::{ListController, ListEvent, ListOptions};
pub use debounce::Debouncer;
pub use removal::{Removal, remove_post, removal_question, removed_toast};
pub use widget::{PaginationView, PaginationWidget};
