//! From a natural-language request to a taskwarrior invocation and back.
//!
//! The pipeline is three pure steps:
//!
//! 1. [`classify`] picks an [`Intent`] from an ordered trigger table and
//!    strips the trigger, leaving residual text.
//! 2. [`synthesize`] turns intent + residual + [`Context`] into a
//!    [`SynthesizedCommand`] (verb and structured argument list).
//! 3. [`normalize`] reshapes the tool's raw output for an AI reader.
//!
//! Nothing here touches the filesystem or spawns processes.
//!
//! [`Context`]: taskweave_context::Context

mod classify;
mod command;
mod normalize;
mod synthesize;

pub use classify::{Intent, ParsedRequest, classify};
pub use command::{SynthesizedCommand, split_words, tokenize};
pub use normalize::{TASK_LIST_HEADING, normalize};
pub use synthesize::{DEFAULT_COMPLETE_ID, synthesize};
