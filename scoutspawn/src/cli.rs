use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scoutspawn_core::config::env_keys::launch as launch_keys;

/// scoutspawn - spawn the Scout v2 robot into a running Gazebo simulation
#[derive(Parser, Debug)]
#[command(name = "scoutspawn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Defaults for the declared launch arguments. `name:=value` arguments
/// given at launch time still win over these.
#[derive(Args, Debug, Clone, Default)]
pub struct DefaultArgs {
    /// Default robot namespace (launch default: scout_mini)
    #[arg(long, value_name = "NAMESPACE", env = launch_keys::SCOUTSPAWN_NAMESPACE)]
    pub namespace: Option<String>,

    /// Default x position in meters (launch default: 0.0)
    #[arg(long, value_name = "X", allow_hyphen_values = true, env = launch_keys::SCOUTSPAWN_X_POSE)]
    pub x_pose: Option<String>,

    /// Default y position in meters (launch default: 0.0)
    #[arg(long, value_name = "Y", allow_hyphen_values = true, env = launch_keys::SCOUTSPAWN_Y_POSE)]
    pub y_pose: Option<String>,

    /// Default yaw angle in radians (launch default: 0.0)
    #[arg(long, value_name = "YAW", allow_hyphen_values = true, env = launch_keys::SCOUTSPAWN_YAW_POSE)]
    pub yaw_pose: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Spawn the robot: resolve launch arguments and run gazebo_ros spawn_entity.py
    Launch {
        /// Launch arguments, e.g. namespace:=robot42 x_pose:=1.5
        #[arg(value_name = "NAME:=VALUE")]
        launch_arguments: Vec<String>,

        #[command(flatten)]
        defaults: DefaultArgs,

        /// YAML mapping of launch arguments; NAME:=VALUE arguments override it
        #[arg(long, value_name = "FILE")]
        args_file: Option<PathBuf>,

        /// List declared launch arguments and exit
        #[arg(long, default_value = "false")]
        show_args: bool,

        /// Resolve everything and print the spawner command without running it
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// Print the launch description without resolving it
    Describe {
        #[command(flatten)]
        defaults: DefaultArgs,

        /// Emit JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// List packages found through AMENT_PREFIX_PATH
    Packages,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_launch_with_arguments_and_negative_pose() {
        let cli = Cli::try_parse_from([
            "scoutspawn",
            "launch",
            "namespace:=robot42",
            "x_pose:=-1.5",
            "--y-pose",
            "-2.0",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Launch {
                launch_arguments,
                defaults,
                dry_run,
                show_args,
                ..
            } => {
                assert_eq!(launch_arguments, vec!["namespace:=robot42", "x_pose:=-1.5"]);
                assert_eq!(defaults.y_pose.as_deref(), Some("-2.0"));
                assert!(dry_run);
                assert!(!show_args);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_describe_json() {
        let cli = Cli::try_parse_from(["scoutspawn", "describe", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Describe { json: true, .. }));
    }
}
