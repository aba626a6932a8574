//! The `print` command: walk a directory and report it

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{DirprintError, RenderError};
use crate::output::{
    ColorMode, Field, FieldSet, OutputConfig, TextFormatter, XlsxDocument, print_json,
    render_table, should_use_color,
};
use crate::tree::{
    ExcludeSet, NoProgress, StatusLine, TreeWalker, VerboseProgress, WalkProgress, WalkerConfig,
};

use super::Command;

/// Options of the `print` command.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "print",
    bin_name = "dirprint <DIRECTORY> print",
    about = "Print directory content",
    no_binary_name = true
)]
pub struct PrintArgs {
    /// Log every item instead of a single status line
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a spreadsheet to PATH instead of printing to the console
    #[arg(short, long, value_name = "PATH", conflicts_with = "json")]
    pub output: Option<PathBuf>,

    /// Skip entries whose name matches any of these comma-separated patterns
    /// (can be used multiple times)
    #[arg(short, long, value_name = "PATTERNS")]
    pub exclude: Vec<String>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Show the item name column
    #[arg(long)]
    pub name: bool,

    /// Show the containing directory
    #[arg(long)]
    pub path: bool,

    /// Show the full path
    #[arg(long)]
    pub full_path: bool,

    /// Show the item type
    #[arg(long = "type")]
    pub item_type: bool,

    /// Show the size in bytes
    #[arg(long)]
    pub size: bool,

    /// Show the file extension
    #[arg(long)]
    pub extension: bool,

    /// Show the command that produced each item (spreadsheet only)
    #[arg(long)]
    pub command: bool,

    /// Show whether each item was read without problems (spreadsheet only)
    #[arg(long)]
    pub result: bool,

    /// Show the problem met on each item, if any (spreadsheet only)
    #[arg(long)]
    pub remark: bool,

    /// Repeat names along the tree connectors of the spreadsheet
    #[arg(long)]
    pub log_parent_name: bool,

    /// Print the tree as JSON
    #[arg(long)]
    pub json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,
}

impl PrintArgs {
    pub fn walker_config(&self) -> WalkerConfig {
        let mut excludes = ExcludeSet::default();
        for list in &self.exclude {
            excludes.extend_from_list(list);
        }
        WalkerConfig {
            recursive: self.recursive,
            excludes,
        }
    }

    pub fn fields(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.toggle(Field::Name, self.name);
        fields.toggle(Field::Path, self.path);
        fields.toggle(Field::FullPath, self.full_path);
        fields.toggle(Field::Type, self.item_type);
        fields.toggle(Field::Size, self.size);
        fields.toggle(Field::Extension, self.extension);
        fields.toggle(Field::Command, self.command);
        fields.toggle(Field::Result, self.result);
        fields.toggle(Field::Remark, self.remark);
        fields
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            fields: self.fields(),
            log_parent_name: self.log_parent_name,
            use_color: should_use_color(self.color),
        }
    }
}

/// Walks the directory and renders it to the console, a spreadsheet or JSON.
#[derive(Debug, Default)]
pub struct PrintCommand {
    args: PrintArgs,
}

impl PrintCommand {
    pub fn new(args: PrintArgs) -> Self {
        Self { args }
    }

    pub fn args(&self) -> &PrintArgs {
        &self.args
    }

    fn progress(&self) -> Box<dyn WalkProgress> {
        if self.args.verbose {
            Box::new(VerboseProgress)
        } else if std::io::stderr().is_terminal() {
            Box::new(StatusLine::new())
        } else {
            Box::new(NoProgress)
        }
    }
}

impl Command for PrintCommand {
    fn name(&self) -> &'static str {
        "print"
    }

    fn description(&self) -> &'static str {
        "Print directory content"
    }

    fn parse_args(&mut self, args: &[String]) -> Result<(), clap::Error> {
        self.args = PrintArgs::try_parse_from(args)?;
        Ok(())
    }

    fn verbose(&self) -> bool {
        self.args.verbose
    }

    fn run(&mut self, directory: &Path) -> Result<(), DirprintError> {
        let walker = TreeWalker::new(self.args.walker_config()).with_tag(self.tag());
        let mut progress = self.progress();
        let report = walker.walk(directory, progress.as_mut())?;

        if !report.errors.is_empty() {
            eprintln!(
                "dirprint: warning: {} entries could not be read:",
                report.errors.len()
            );
            for err in &report.errors {
                eprintln!("  {}", err);
            }
        }

        let output = self.args.output_config();
        if self.args.json {
            print_json(&report.tree, &report.counts)?;
        } else if let Some(path) = &self.args.output {
            let mut document = XlsxDocument::create(path)?;
            let summary = render_table(
                &report.tree,
                &output.fields,
                output.log_parent_name,
                &mut document,
            )?;
            println!("Wrote {} rows to {}", summary.rows, path.display());
            println!("{}", report.counts);
        } else {
            TextFormatter::new(output)
                .print(&report.tree, &report.counts)
                .map_err(RenderError::from)?;
        }
        Ok(())
    }
}
