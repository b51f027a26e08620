// Purpose - external interfaces, format conversions

pub mod converter;
pub mod event;

pub use event::{ChannelEvent, ChannelKind};
