//! Composite versus flat drawing benchmark
//!
//! Both strategies draw the same leaf set (all circles, then all squares), so
//! their action sequences are identical; only the call site differs.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use crate::application::services::RenderService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::BenchConfig;
use crate::domain::{Circle, DrawAction, NodeId, Scene, Square};
use crate::infrastructure::traits::DrawSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One composite holding every leaf, drawn once at the root
    Composite,
    /// Separate circle and square collections, drawn by two loops
    Flat,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Composite => write!(f, "composite"),
            Strategy::Flat => write!(f, "flat"),
        }
    }
}

/// Leaf set to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkPlan {
    pub circles: usize,
    pub squares: usize,
    pub radius: f64,
    pub side_length: f64,
}

impl BenchmarkPlan {
    /// Total leaf count; fails when `circles + squares` does not fit in `usize`.
    pub fn total(&self) -> ApplicationResult<usize> {
        self.circles
            .checked_add(self.squares)
            .ok_or_else(|| ApplicationError::Config {
                message: format!(
                    "bench size overflows: {} circles + {} squares",
                    self.circles, self.squares
                ),
            })
    }
}

impl From<&BenchConfig> for BenchmarkPlan {
    fn from(cfg: &BenchConfig) -> Self {
        Self {
            circles: cfg.circles,
            squares: cfg.squares,
            radius: cfg.radius,
            side_length: cfg.side_length,
        }
    }
}

/// Outcome of one strategy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub strategy: Strategy,
    pub actions: usize,
    pub build: Duration,
    pub draw: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkReport {
    pub composite: Measurement,
    pub flat: Measurement,
}

impl BenchmarkReport {
    pub fn counts_match(&self) -> bool {
        self.composite.actions == self.flat.actions
    }
}

/// Service running the composite and flat drawing strategies.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkService {
    plan: BenchmarkPlan,
    render: RenderService,
}

impl BenchmarkService {
    /// Create a benchmark service. Composite headers are never emitted here,
    /// so both strategies produce comparable sequences.
    pub fn new(plan: BenchmarkPlan) -> Self {
        Self {
            plan,
            render: RenderService::new(false),
        }
    }

    pub fn plan(&self) -> &BenchmarkPlan {
        &self.plan
    }

    fn leaves(&self) -> ApplicationResult<(Circle, Square)> {
        Ok((
            Circle::new(self.plan.radius)?,
            Square::new(self.plan.side_length)?,
        ))
    }

    /// Build the composite scene: one root holding all circles, then all squares.
    #[instrument(level = "debug", skip(self))]
    pub fn build_scene(&self) -> ApplicationResult<(Scene, NodeId)> {
        let (circle, square) = self.leaves()?;
        let capacity = self.plan.total()?.saturating_add(1);
        let mut scene = Scene::with_capacity(capacity);
        let root = scene.composite();
        for _ in 0..self.plan.circles {
            let leaf = scene.insert_shape(circle);
            scene.add(root, leaf)?;
        }
        for _ in 0..self.plan.squares {
            let leaf = scene.insert_shape(square);
            scene.add(root, leaf)?;
        }
        debug!("build_scene: {} nodes", scene.len());
        Ok((scene, root))
    }

    #[instrument(level = "info", skip(self, sink))]
    pub fn run_composite<S: DrawSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> ApplicationResult<Measurement> {
        let started = Instant::now();
        let (scene, root) = self.build_scene()?;
        let build = started.elapsed();

        let started = Instant::now();
        let actions = self.render.draw(&scene, root, sink)?;
        let draw = started.elapsed();

        info!("composite: {} actions, build {:?}, draw {:?}", actions, build, draw);
        Ok(Measurement {
            strategy: Strategy::Composite,
            actions,
            build,
            draw,
        })
    }

    #[instrument(level = "info", skip(self, sink))]
    pub fn run_flat<S: DrawSink + ?Sized>(&self, sink: &mut S) -> ApplicationResult<Measurement> {
        self.plan.total()?;
        let (circle, square) = self.leaves()?;

        let started = Instant::now();
        let circles = vec![circle; self.plan.circles];
        let squares = vec![square; self.plan.squares];
        let build = started.elapsed();

        let started = Instant::now();
        let mut actions = 0;
        for circle in &circles {
            emit(sink, &circle.draw_action(), actions)?;
            actions += 1;
        }
        for square in &squares {
            emit(sink, &square.draw_action(), actions)?;
            actions += 1;
        }
        sink.flush()
            .map_err(|e| ApplicationError::render("flush sink", e))?;
        let draw = started.elapsed();

        info!("flat: {} actions, build {:?}, draw {:?}", actions, build, draw);
        Ok(Measurement {
            strategy: Strategy::Flat,
            actions,
            build,
            draw,
        })
    }

    /// Run both strategies, composite first.
    pub fn compare<A, B>(&self, composite_sink: &mut A, flat_sink: &mut B) -> ApplicationResult<BenchmarkReport>
    where
        A: DrawSink + ?Sized,
        B: DrawSink + ?Sized,
    {
        let composite = self.run_composite(composite_sink)?;
        let flat = self.run_flat(flat_sink)?;
        Ok(BenchmarkReport { composite, flat })
    }
}

/// Emit one action, tagging a sink failure with its 1-based position.
pub(crate) fn emit<S: DrawSink + ?Sized>(
    sink: &mut S,
    action: &DrawAction,
    emitted: usize,
) -> ApplicationResult<()> {
    sink.emit(action).map_err(|e| {
        ApplicationError::render(format!("emit action #{}: {}", emitted + 1, action), e)
    })
}
