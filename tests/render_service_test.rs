//! Tests for RenderService

use std::io;

use shapetree::application::demo;
use shapetree::application::services::RenderService;
use shapetree::application::ApplicationError;
use shapetree::domain::{DomainError, DrawAction, Scene};
use shapetree::infrastructure::traits::{DrawSink, RecordingSink, WriterSink};

/// Sink that fails on the n-th emit (1-based) and records what came before.
struct FailingSink {
    fail_at: usize,
    seen: usize,
    flushed: bool,
}

impl FailingSink {
    fn new(fail_at: usize) -> Self {
        Self {
            fail_at,
            seen: 0,
            flushed: false,
        }
    }
}

impl DrawSink for FailingSink {
    fn emit(&mut self, _action: &DrawAction) -> io::Result<()> {
        self.seen += 1;
        if self.seen == self.fail_at {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed = true;
        Ok(())
    }
}

#[test]
fn given_basic_scene_when_drawing_then_writes_two_lines() {
    // Arrange
    let (scene, root) = demo::basic_scene().unwrap();
    let service = RenderService::new(false);
    let mut sink = WriterSink::new(Vec::new());

    // Act
    let emitted = service.draw(&scene, root, &mut sink).unwrap();

    // Assert
    assert_eq!(emitted, 2);
    let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(
        out,
        "Drawing Circle with radius 5\nDrawing Square with side length 4\n"
    );
}

#[test]
fn given_announce_when_drawing_nested_then_includes_composite_headers() {
    let (scene, root) = demo::nested_scene().unwrap();
    let service = RenderService::new(true);
    let mut sink = RecordingSink::new();

    let emitted = service.draw(&scene, root, &mut sink).unwrap();

    assert_eq!(emitted, 4);
    assert_eq!(
        sink.lines(),
        vec![
            "Drawing Composite: outer",
            "Drawing Composite: inner",
            "Drawing Square with side length 2",
            "Drawing Circle with radius 1",
        ]
    );
}

#[test]
fn given_failing_sink_when_drawing_then_aborts_at_first_failure() {
    let mut scene = Scene::new();
    let root = scene.composite();
    for r in 0..5 {
        let leaf = scene.circle(r as f64).unwrap();
        scene.add(root, leaf).unwrap();
    }
    let service = RenderService::default();
    let mut sink = FailingSink::new(3);

    let result = service.draw(&scene, root, &mut sink);

    match result {
        Err(ApplicationError::Render { context, source }) => {
            assert!(context.contains("#3"), "context: {}", context);
            assert!(context.contains("radius 2"), "context: {}", context);
            assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        }
        other => panic!("expected render error, got {:?}", other),
    }
    assert_eq!(sink.seen, 3, "traversal must stop at the failing action");
    assert!(!sink.flushed);
}

#[test]
fn given_unknown_root_when_drawing_then_node_not_found() {
    let mut other = Scene::new();
    let foreign = other.composite();
    let scene = Scene::new();
    let mut sink = RecordingSink::new();

    let result = RenderService::default().draw(&scene, foreign, &mut sink);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::NodeNotFound(_)))
    ));
    assert!(sink.actions.is_empty());
}

#[test]
fn given_same_scene_when_drawing_twice_then_output_is_identical() {
    let (scene, root) = demo::nested_scene().unwrap();
    let service = RenderService::new(false);
    let mut first = RecordingSink::new();
    let mut second = RecordingSink::new();

    service.draw(&scene, root, &mut first).unwrap();
    service.draw(&scene, root, &mut second).unwrap();

    assert_eq!(first, second);
}
