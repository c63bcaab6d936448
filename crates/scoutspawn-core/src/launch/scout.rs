//! Launch description that spawns the Scout v2 model into a running Gazebo.

use std::path::PathBuf;

use super::action::{
    DeclareLaunchArgument, LaunchAction, LaunchDescription, NodeAction, OutputMode, ValueKind,
};
use super::substitution::{ReplaceString, Substitution};
use crate::ament::PackageIndex;
use crate::error::{LaunchError, Result};

pub const MODEL_PACKAGE: &str = "scout_gazebo_sim";
pub const MODEL_SUBPATH: [&str; 3] = ["models", "scout_v2", "scout_v2.sdf"];
/// Placeholder in the SDF replaced with `/<namespace>`.
pub const NAMESPACE_TOKEN: &str = "/robot_namespace";

pub const SPAWNER_PACKAGE: &str = "gazebo_ros";
pub const SPAWNER_EXECUTABLE: &str = "spawn_entity.py";
/// Spawn height; puts the wheels on the ground plane.
pub const SPAWN_Z: &str = "0.349";
pub const ENTITY_SUFFIX: &str = "_robot";

pub const ARG_NAMESPACE: &str = "namespace";
pub const ARG_X_POSE: &str = "x_pose";
pub const ARG_Y_POSE: &str = "y_pose";
pub const ARG_YAW_POSE: &str = "yaw_pose";

/// Default values for the four declared arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoutSpawnDefaults {
    pub namespace: String,
    pub x_pose: String,
    pub y_pose: String,
    pub yaw_pose: String,
}

impl Default for ScoutSpawnDefaults {
    fn default() -> Self {
        Self {
            namespace: "scout_mini".to_string(),
            x_pose: "0.0".to_string(),
            y_pose: "0.0".to_string(),
            yaw_pose: "0.0".to_string(),
        }
    }
}

impl ScoutSpawnDefaults {
    /// Replace individual defaults; `None` keeps the current value.
    pub fn with_overrides(
        mut self,
        namespace: Option<String>,
        x_pose: Option<String>,
        y_pose: Option<String>,
        yaw_pose: Option<String>,
    ) -> Self {
        if let Some(v) = namespace {
            self.namespace = v;
        }
        if let Some(v) = x_pose {
            self.x_pose = v;
        }
        if let Some(v) = y_pose {
            self.y_pose = v;
        }
        if let Some(v) = yaw_pose {
            self.yaw_pose = v;
        }
        self
    }
}

/// `<share(scout_gazebo_sim)>/models/scout_v2/scout_v2.sdf`, which must exist.
pub fn model_path<I: PackageIndex + ?Sized>(index: &I) -> Result<PathBuf> {
    let path = MODEL_SUBPATH
        .iter()
        .fold(index.share_directory(MODEL_PACKAGE)?, |p, seg| p.join(seg));
    if !path.is_file() {
        return Err(LaunchError::ResourceNotFound { path });
    }
    Ok(path)
}

/// Four argument declarations followed by the spawner node.
///
/// Fails without returning any actions when `scout_gazebo_sim` or its model
/// file cannot be found.
pub fn generate_launch_description<I: PackageIndex + ?Sized>(
    index: &I,
    defaults: &ScoutSpawnDefaults,
) -> Result<LaunchDescription> {
    let sdf_path = model_path(index)?;

    let declare_namespace = DeclareLaunchArgument::new(
        ARG_NAMESPACE,
        &defaults.namespace,
        "Specify robot namespace",
    );
    let declare_x_pose =
        DeclareLaunchArgument::new(ARG_X_POSE, &defaults.x_pose, "Specify robot x position")
            .with_kind(ValueKind::Number);
    let declare_y_pose =
        DeclareLaunchArgument::new(ARG_Y_POSE, &defaults.y_pose, "Specify robot y position")
            .with_kind(ValueKind::Number);
    let declare_yaw_pose =
        DeclareLaunchArgument::new(ARG_YAW_POSE, &defaults.yaw_pose, "Specify robot yaw angle")
            .with_kind(ValueKind::Number);

    let namespaced_sdf = ReplaceString::new(sdf_path).replace(
        NAMESPACE_TOKEN,
        vec![Substitution::text("/"), Substitution::config(ARG_NAMESPACE)],
    );

    let spawner = NodeAction::new(SPAWNER_PACKAGE, SPAWNER_EXECUTABLE)
        .arg("-entity")
        .arg_composite(vec![
            Substitution::config(ARG_NAMESPACE),
            Substitution::text(ENTITY_SUFFIX),
        ])
        .arg("-file")
        .arg_composite(vec![Substitution::ReplaceString(namespaced_sdf)])
        .arg("-x")
        .arg_composite(vec![Substitution::config(ARG_X_POSE)])
        .arg("-y")
        .arg_composite(vec![Substitution::config(ARG_Y_POSE)])
        .arg("-z")
        .arg(SPAWN_Z)
        .arg("-Y")
        .arg_composite(vec![Substitution::config(ARG_YAW_POSE)])
        .output(OutputMode::Screen);

    let mut ld = LaunchDescription::new();
    ld.add_action(LaunchAction::DeclareLaunchArgument(declare_namespace));
    ld.add_action(LaunchAction::DeclareLaunchArgument(declare_x_pose));
    ld.add_action(LaunchAction::DeclareLaunchArgument(declare_y_pose));
    ld.add_action(LaunchAction::DeclareLaunchArgument(declare_yaw_pose));
    ld.add_action(LaunchAction::Node(spawner));
    Ok(ld)
}
