// App module: owned application state, the selection state machine, the
// keyed join/transition engine, and keyboard dispatch.

pub mod input;
pub mod join;
pub mod selection;
pub mod state;
pub mod view;

pub use input::handle_input;
pub use selection::{Highlight, SelectionSet};
pub use state::{App, AppScreen, Brush, ChartFocus};
