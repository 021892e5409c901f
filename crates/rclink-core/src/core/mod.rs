//! Core traits shared between the transport and its presenters

pub mod listener;

pub use listener::{LinkListener, LinkListenerHandle, NoOpListener};
