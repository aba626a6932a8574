//! Commands the binary can run against a directory
//!
//! A command parses its own options, runs against the target directory and
//! tags every item it produces with a [`CommandTag`], so reports can show
//! which command an item came from.

mod print;

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::error::DirprintError;

pub use print::{PrintArgs, PrintCommand};

/// Names the command that produced an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommandTag(&'static str);

impl CommandTag {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CommandTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A named operation on a directory.
pub trait Command {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Parse the options that follow the command name.
    fn parse_args(&mut self, args: &[String]) -> Result<(), clap::Error>;

    /// Whether the parsed options asked for per-item diagnostics.
    fn verbose(&self) -> bool {
        false
    }

    fn run(&mut self, directory: &Path) -> Result<(), DirprintError>;

    fn tag(&self) -> CommandTag {
        CommandTag::new(self.name())
    }

    /// Run with start and finish events logged around it.
    fn start(&mut self, directory: &Path) -> Result<(), DirprintError> {
        info!("command {} started on {}", self.name(), directory.display());
        let result = self.run(directory);
        match &result {
            Ok(()) => info!("command {} finished (success)", self.name()),
            Err(e) => info!("command {} finished (failed): {}", self.name(), e),
        }
        result
    }
}

/// Every command the binary knows, by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PrintCommand::default()));
        registry
    }

    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Command>> {
        self.commands.iter_mut().find(|c| c.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Command list for the usage text.
    pub fn help(&self) -> String {
        let mut help = String::from("Commands:");
        for command in &self.commands {
            help.push_str(&format!("\n    {}:    {}", command.name(), command.description()));
        }
        help
    }
}
