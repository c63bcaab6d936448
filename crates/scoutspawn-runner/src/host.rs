//! Launch host: executes a [`LaunchDescription`] front to back.

use std::collections::BTreeMap;
use std::path::PathBuf;

use scoutspawn_core::ament::PackageIndex;
use scoutspawn_core::launch::{LaunchAction, LaunchContext, LaunchDescription, ResolvedNode};
use scoutspawn_core::{observability, LaunchError};

use crate::executable::resolve_executable;
use crate::process::{self, ExecutionResult};

/// A node ready to run: resolved arguments plus the program path.
#[derive(Debug, Clone)]
pub struct PlannedNode {
    pub node: ResolvedNode,
    pub program: PathBuf,
}

impl PlannedNode {
    /// Shell-style rendering for logs and dry runs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.node.arguments.iter().map(|a| shell_quote(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn label(&self) -> String {
        self.node
            .flag_value("-entity")
            .map(str::to_string)
            .unwrap_or_else(|| self.node.executable.clone())
    }
}

fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+,".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

#[derive(Debug)]
pub struct NodeOutcome {
    pub planned: PlannedNode,
    /// `None` on a dry run.
    pub result: Option<ExecutionResult>,
}

/// Everything a launch produced. Owns the launch context so materialized
/// files stay on disk until the report is dropped.
#[derive(Debug)]
pub struct LaunchReport {
    pub nodes: Vec<NodeOutcome>,
    pub context: LaunchContext,
}

impl LaunchReport {
    /// First non-zero exit code, or 0.
    pub fn exit_code(&self) -> i32 {
        self.nodes
            .iter()
            .filter_map(|n| n.result.as_ref())
            .map(|r| r.exit_code)
            .find(|c| *c != 0)
            .unwrap_or(0)
    }
}

pub struct LaunchRunner<'a, I: PackageIndex + ?Sized> {
    index: &'a I,
    dry_run: bool,
}

impl<'a, I: PackageIndex + ?Sized> LaunchRunner<'a, I> {
    pub fn new(index: &'a I) -> Self {
        Self {
            index,
            dry_run: false,
        }
    }

    /// Resolve everything but do not spawn.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run every action in order with the caller's `name:=value` arguments.
    ///
    /// Nodes run one after another; a failing node does not stop later ones.
    pub fn execute(
        &self,
        description: &LaunchDescription,
        arguments: BTreeMap<String, String>,
    ) -> Result<LaunchReport, LaunchError> {
        let mut context = LaunchContext::with_arguments(arguments);
        let mut planned = Vec::new();

        // Resolve the whole description before starting anything.
        for action in description.actions() {
            match action {
                LaunchAction::DeclareLaunchArgument(decl) => context.declare(decl)?,
                LaunchAction::Node(node) => {
                    let node = context.resolve_node(node)?;
                    let program = resolve_executable(self.index, &node.package, &node.executable)?;
                    planned.push(PlannedNode { node, program });
                }
            }
        }
        for name in context.undeclared_overrides() {
            tracing::warn!(argument = name, "Launch argument is not declared and was ignored");
        }

        let mut nodes = Vec::with_capacity(planned.len());
        for plan in planned {
            let result = if self.dry_run {
                tracing::info!(command = %plan.command_line(), "Dry run, not spawning");
                None
            } else {
                Some(self.spawn(&plan)?)
            };
            nodes.push(NodeOutcome {
                planned: plan,
                result,
            });
        }
        Ok(LaunchReport { nodes, context })
    }

    fn spawn(&self, plan: &PlannedNode) -> Result<ExecutionResult, LaunchError> {
        let label = plan.label();
        tracing::info!(node = %label, command = %plan.command_line(), "Starting node");
        observability::audit_execution_started(
            &label,
            &plan.program.display().to_string(),
            &plan.node.arguments,
        );
        let result = process::run(&plan.program, &plan.node.arguments, plan.node.output, &label)?;
        observability::audit_execution_completed(
            &label,
            result.exit_code,
            result.duration.as_millis() as u64,
        );
        Ok(result)
    }
}
