//! The spelling-practice panel: tool declaration, event reducer, feedback
//! timer, presentation and the async session driver that ties them together.

mod builder;
pub mod config;
pub mod feedback;
pub mod panel;
pub mod reducer;
pub mod session;
pub mod state;
pub mod tool;
pub mod view;

pub use builder::SpellingSessionBuilder;
pub use config::{PanelConfig, PanelConfigBuilder};
pub use feedback::FeedbackScheduler;
pub use panel::{Outbound, SpellingPanel};
pub use reducer::{Action, Effect, Transition, reduce};
pub use session::{PanelSnapshot, SpellingSession};
pub use state::{PanelState, PracticeRecord, SessionPhase, SpellingOutput};
pub use tool::{DISPLAY_SPELLED_WORD, SpelledWordArgs, ToolDefinition, is_correct_spelling};
pub use view::{View, render};
