pub mod debounce;
pub mod event;
pub mod input;
pub mod navigator;
pub mod tree;

pub use debounce::{DEFAULT_DEBOUNCE_INTERVAL, DebounceGate};
pub use event::{Action, Direction, Key, PadButton, RawEvent};
pub use input::{InputMap, InputMapper};
pub use navigator::Navigator;
pub use tree::{FocusHandle, FocusTree, Node, NodeId, Orientation};
