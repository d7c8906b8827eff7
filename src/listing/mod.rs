//! Flat listing interaction state: keyboard focus and selection.
//!
//! A [`Listing`] owns an ordered sequence of keyed items and turns raw key
//! events into focus and selection transitions. It never renders anything and
//! never performs I/O; the hosting screen feeds events in and reads the
//! derived state out.

pub mod keys;
pub mod registry;
pub mod state;

pub use keys::KeyAction;
pub use registry::ListingRegistry;
pub use state::{FocusMove, Keyed, Listing, Modifiers, SelectionMode};
