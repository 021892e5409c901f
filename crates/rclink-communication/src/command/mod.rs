//! Outbound command path

pub mod control_pad;
pub mod sender;

pub use control_pad::ControlPad;
pub use sender::CommandSender;
