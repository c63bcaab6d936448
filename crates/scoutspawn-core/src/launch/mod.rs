//! Launch description model and resolution.
//!
//! A [`LaunchDescription`] is a plain ordered list of actions. Nothing is
//! resolved until a host walks it with a [`LaunchContext`].

pub mod action;
pub mod arguments;
pub mod context;
pub mod scout;
pub mod substitution;

pub use action::{
    DeclareLaunchArgument, LaunchAction, LaunchDescription, NodeAction, OutputMode, ValueKind,
};
pub use context::{LaunchContext, ResolvedNode};
pub use scout::{generate_launch_description, ScoutSpawnDefaults};
pub use substitution::{ReplaceString, Replacement, Substitution};
