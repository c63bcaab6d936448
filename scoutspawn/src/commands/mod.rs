//! Command implementations, one module per subcommand group.

pub mod describe;
pub mod launch;

use scoutspawn_core::launch::ScoutSpawnDefaults;

use crate::cli::DefaultArgs;

impl DefaultArgs {
    pub fn to_defaults(&self) -> ScoutSpawnDefaults {
        ScoutSpawnDefaults::default().with_overrides(
            self.namespace.clone(),
            self.x_pose.clone(),
            self.y_pose.clone(),
            self.yaw_pose.clone(),
        )
    }
}
