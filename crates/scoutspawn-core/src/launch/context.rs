//! Resolution state for one execution of a launch description.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use serde::Serialize;
use tempfile::NamedTempFile;

use super::action::{DeclareLaunchArgument, NodeAction, OutputMode};
use super::substitution::{ReplaceString, Substitution};
use crate::error::{LaunchError, Result};

/// A node with every argument resolved to a concrete string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedNode {
    pub package: String,
    pub executable: String,
    pub arguments: Vec<String>,
    pub output: OutputMode,
}

impl ResolvedNode {
    /// Value following `flag` in the argument vector, e.g. `-entity`.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.arguments
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.arguments.get(i + 1))
            .map(|s| s.as_str())
    }
}

/// Launch configurations plus every temporary file materialized while
/// resolving. Temporary files are removed when the context drops.
#[derive(Debug, Default)]
pub struct LaunchContext {
    configurations: BTreeMap<String, String>,
    overridden: BTreeSet<String>,
    declared: BTreeSet<String>,
    materialized: Vec<NamedTempFile>,
}

impl LaunchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with caller-supplied `name:=value` launch arguments.
    pub fn with_arguments(arguments: BTreeMap<String, String>) -> Self {
        Self {
            overridden: arguments.keys().cloned().collect(),
            configurations: arguments,
            ..Self::default()
        }
    }

    pub fn configuration(&self, name: &str) -> Option<&str> {
        self.configurations.get(name).map(|s| s.as_str())
    }

    pub fn configurations(&self) -> &BTreeMap<String, String> {
        &self.configurations
    }

    /// Set the argument's configuration unless the caller already supplied one,
    /// then check it against the declared kind.
    pub fn declare(&mut self, arg: &DeclareLaunchArgument) -> Result<()> {
        self.declared.insert(arg.name.clone());
        let value = self
            .configurations
            .entry(arg.name.clone())
            .or_insert_with(|| arg.default_value.clone());
        arg.kind
            .validate(value)
            .map_err(|reason| LaunchError::InvalidArgument {
                name: arg.name.clone(),
                value: value.clone(),
                reason,
            })?;
        tracing::debug!(name = %arg.name, value = %value, "Declared launch argument");
        Ok(())
    }

    /// Caller-supplied arguments that no declaration picked up.
    pub fn undeclared_overrides(&self) -> Vec<&str> {
        self.overridden
            .difference(&self.declared)
            .map(|s| s.as_str())
            .collect()
    }

    /// Resolve a composite value by concatenating its fragments.
    pub fn resolve(&mut self, value: &[Substitution]) -> Result<String> {
        let mut out = String::new();
        for sub in value {
            out.push_str(&self.perform(sub)?);
        }
        Ok(out)
    }

    pub fn perform(&mut self, sub: &Substitution) -> Result<String> {
        match sub {
            Substitution::Text(s) => Ok(s.clone()),
            Substitution::LaunchConfiguration(name) => self
                .configurations
                .get(name)
                .cloned()
                .ok_or_else(|| LaunchError::UndeclaredArgument(name.clone())),
            Substitution::ReplaceString(r) => self.materialize(r),
        }
    }

    pub fn resolve_node(&mut self, node: &NodeAction) -> Result<ResolvedNode> {
        let arguments = node
            .arguments
            .iter()
            .map(|a| self.resolve(a))
            .collect::<Result<Vec<_>>>()?;
        Ok(ResolvedNode {
            package: node.package.clone(),
            executable: node.executable.clone(),
            arguments,
            output: node.output,
        })
    }

    fn materialize(&mut self, r: &ReplaceString) -> Result<String> {
        let content = std::fs::read_to_string(&r.source_file).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LaunchError::ResourceNotFound {
                    path: r.source_file.clone(),
                }
            } else {
                LaunchError::io(format!("read {}", r.source_file.display()), e)
            }
        })?;

        let mut resolved = Vec::with_capacity(r.replacements.len());
        for rep in &r.replacements {
            resolved.push((rep.pattern.clone(), self.resolve(&rep.value)?));
        }
        let replaced = ReplaceString::apply(&content, &resolved);

        let suffix = r
            .source_file
            .file_name()
            .map(|n| format!("_{}", n.to_string_lossy()))
            .unwrap_or_default();
        let mut file = tempfile::Builder::new()
            .prefix("scoutspawn_")
            .suffix(&suffix)
            .tempfile()
            .map_err(|e| LaunchError::io("create temporary file", e))?;
        file.write_all(replaced.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| LaunchError::io("write temporary file", e))?;

        let path = file.path().to_string_lossy().to_string();
        tracing::debug!(
            source = %r.source_file.display(),
            materialized = %path,
            "Materialized replaced file"
        );
        self.materialized.push(file);
        Ok(path)
    }
}
