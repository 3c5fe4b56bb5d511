pub mod computer;
pub mod human;
pub mod prompt;

pub use computer::ComputerPlayer;
pub use human::HumanPlayer;
pub use prompt::{Prompt, ScriptedPrompt, TerminalPrompt};
