//! Actor module: the frame loop thread and the console coordinator.
//!
//! One dedicated thread owns the render cadence; callers mutate the shared
//! screen buffer from any thread and observe the loop through an event
//! channel:
//!
//! ```text
//! ┌──────────────┐   write_at / resize   ┌──────────────────┐
//! │ Caller threads│ ────────────────────▶│  ScreenBuffer    │
//! └──────────────┘                       │  (RwLock-shared) │
//!        ▲                               └──────────────────┘
//!        │ FrameEvent                             │ read
//!        │                               ┌──────────────────┐
//!        └────────────────────────────── │  Frame Loop      │──▶ RenderSurface
//!                                        └──────────────────┘
//! ```

mod console;
mod frame;
mod messages;

pub use console::{Console, ConsoleConfig};
pub use frame::{FrameLoop, FrameStats};
pub use messages::FrameEvent;
