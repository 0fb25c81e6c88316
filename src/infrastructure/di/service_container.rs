//! Service container for dependency injection
//!
//! Wires up services and output sinks from settings.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{BenchmarkPlan, BenchmarkService, RenderService};
use crate::config::Settings;
use crate::infrastructure::traits::{DrawSink, WriterSink};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,
}

impl ServiceContainer {
    /// Create a new service container.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    pub fn render_service(&self) -> RenderService {
        RenderService::new(self.settings.render.announce_composites)
    }

    /// Benchmark service for the configured plan, with optional size overrides.
    pub fn benchmark_service(
        &self,
        circles: Option<usize>,
        squares: Option<usize>,
    ) -> BenchmarkService {
        let mut plan = BenchmarkPlan::from(&self.settings.bench);
        if let Some(n) = circles {
            plan.circles = n;
        }
        if let Some(n) = squares {
            plan.squares = n;
        }
        BenchmarkService::new(plan)
    }

    /// Text sink for draw output: the configured output file, or stdout.
    pub fn output_sink(&self) -> InfraResult<Box<dyn DrawSink>> {
        match &self.settings.render.output {
            Some(path) => {
                debug!("output_sink: writing to {}", path.display());
                let sink = WriterSink::create(path)
                    .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
                Ok(Box::new(sink))
            }
            None => Ok(Box::new(WriterSink::stdout())),
        }
    }
}
