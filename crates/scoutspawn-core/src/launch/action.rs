//! Launch actions and the ordered description that holds them.

use serde::Serialize;

use super::substitution::{display_composite, Substitution};

/// Accepted shape of a launch argument's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[default]
    Text,
    /// Must parse as a finite `f64`.
    Number,
}

impl ValueKind {
    pub fn validate(self, value: &str) -> Result<(), String> {
        match self {
            Self::Text => Ok(()),
            Self::Number => match value.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(()),
                Ok(_) => Err("value must be finite".to_string()),
                Err(e) => Err(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclareLaunchArgument {
    pub name: String,
    pub default_value: String,
    pub description: String,
    pub kind: ValueKind,
}

impl DeclareLaunchArgument {
    pub fn new(
        name: impl Into<String>,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default_value: default_value.into(),
            description: description.into(),
            kind: ValueKind::Text,
        }
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Where the spawned process writes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Inherit the host's stdout/stderr.
    #[default]
    Screen,
    /// Capture and forward line by line to the log.
    Log,
}

/// Start `executable` from `package` with the given arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeAction {
    pub package: String,
    pub executable: String,
    pub arguments: Vec<Vec<Substitution>>,
    pub output: OutputMode,
}

impl NodeAction {
    pub fn new(package: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            executable: executable.into(),
            arguments: Vec::new(),
            output: OutputMode::default(),
        }
    }

    /// Append one argument made of a single literal.
    pub fn arg(mut self, text: impl Into<String>) -> Self {
        self.arguments.push(vec![Substitution::text(text)]);
        self
    }

    /// Append one argument made of concatenated substitutions.
    pub fn arg_composite(mut self, value: Vec<Substitution>) -> Self {
        self.arguments.push(value);
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LaunchAction {
    DeclareLaunchArgument(DeclareLaunchArgument),
    Node(NodeAction),
}

/// Ordered actions for a launch host to execute front to back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaunchDescription {
    actions: Vec<LaunchAction>,
}

impl LaunchDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, action: LaunchAction) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[LaunchAction] {
        &self.actions
    }

    pub fn declared_arguments(&self) -> impl Iterator<Item = &DeclareLaunchArgument> {
        self.actions.iter().filter_map(|a| match a {
            LaunchAction::DeclareLaunchArgument(d) => Some(d),
            _ => None,
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeAction> {
        self.actions.iter().filter_map(|a| match a {
            LaunchAction::Node(n) => Some(n),
            _ => None,
        })
    }

    /// Human-readable listing, one action per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, action) in self.actions.iter().enumerate() {
            match action {
                LaunchAction::DeclareLaunchArgument(d) => {
                    out.push_str(&format!(
                        "{:>2}. declare {} (default: '{}') {}\n",
                        i + 1,
                        d.name,
                        d.default_value,
                        d.description
                    ));
                }
                LaunchAction::Node(n) => {
                    let args: Vec<String> =
                        n.arguments.iter().map(|a| display_composite(a)).collect();
                    out.push_str(&format!(
                        "{:>2}. node {}/{} [{:?}] {}\n",
                        i + 1,
                        n.package,
                        n.executable,
                        n.output,
                        args.join(" ")
                    ));
                }
            }
        }
        out
    }
}
