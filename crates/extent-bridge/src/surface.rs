//! Drawing surface seam

use crate::event::ToolMode;
use extent_feature::Feature;
use extent_session::Command;

/// The interactive drawing surface the bridge writes back to
#[cfg_attr(test, mockall::automock)]
pub trait DrawSurface {
    /// Overwrite the surface's feature collection
    fn set_features(&mut self, features: &[Feature]);

    /// Switch the surface's interaction mode
    fn change_mode(&mut self, mode: &ToolMode);
}

/// Execute reducer commands against a surface
pub fn apply_commands<S: DrawSurface + ?Sized>(surface: &mut S, commands: &[Command]) {
    for command in commands {
        match command {
            Command::SyncDrawTool(features) => {
                tracing::debug!(count = features.len(), "syncing draw tool");
                surface.set_features(features);
            }
            Command::ClearDrawTool => {
                tracing::debug!("clearing draw tool");
                surface.set_features(&[]);
            }
        }
    }
}
