//! Render service
//!
//! Streams a scene's draw actions into a sink.

use tracing::{debug, instrument};

use super::benchmark::emit;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, NodeId, Scene};
use crate::infrastructure::traits::DrawSink;

/// Service for drawing scenes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderService {
    announce_composites: bool,
}

impl RenderService {
    /// Create a new render service.
    pub fn new(announce_composites: bool) -> Self {
        Self {
            announce_composites,
        }
    }

    /// Draw the tree rooted at `root`, returning the number of actions emitted.
    ///
    /// The first sink failure aborts the traversal; nothing after it is emitted.
    #[instrument(level = "debug", skip(self, scene, sink))]
    pub fn draw<S: DrawSink + ?Sized>(
        &self,
        scene: &Scene,
        root: NodeId,
        sink: &mut S,
    ) -> ApplicationResult<usize> {
        if !scene.contains(root) {
            return Err(DomainError::NodeNotFound(root).into());
        }

        let mut emitted = 0;
        for action in scene.draw_actions(root, self.announce_composites) {
            emit(sink, &action, emitted)?;
            emitted += 1;
        }
        sink.flush()
            .map_err(|e| ApplicationError::render("flush sink", e))?;

        debug!("draw: emitted {} actions", emitted);
        Ok(emitted)
    }
}
