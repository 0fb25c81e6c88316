//! Command dispatch

use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::demo;
use crate::application::services::{BenchmarkReport, Measurement, RenderService};
use crate::cli::args::{Cli, Commands, ConfigCommands, StrategyArg};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{AccountComponent, Component, NodeId, Part, Scene, Shape};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{CountingSink, DrawSink};
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = project_dir(cli)?;
    let settings = Settings::load(Some(&project_dir))?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Draw {
            shapes,
            nested,
            announce,
        }) => cmd_draw(&container, shapes, *nested, *announce),
        Some(Commands::Tree { shapes, nested }) => cmd_tree(shapes, *nested),
        Some(Commands::Bench {
            circles,
            squares,
            strategy,
            print,
        }) => cmd_bench(&container, *circles, *squares, *strategy, *print),
        Some(Commands::Parts { tree }) => cmd_parts(*tree),
        Some(Commands::Accounts { tree }) => cmd_accounts(*tree),
        Some(Commands::Config { command }) => cmd_config(&container, &project_dir, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::from(InfraError::io("print help", e))),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("determine current directory", e))),
    }
}

fn build_scene(shapes: &[Shape], nested: bool) -> CliResult<(Scene, NodeId)> {
    let scene = if nested {
        demo::nested_scene()?
    } else if shapes.is_empty() {
        demo::basic_scene()?
    } else {
        demo::scene_from_shapes(shapes)?
    };
    Ok(scene)
}

#[instrument(skip(container))]
fn cmd_draw(
    container: &ServiceContainer,
    shapes: &[Shape],
    nested: bool,
    announce: bool,
) -> CliResult<()> {
    let (scene, root) = build_scene(shapes, nested)?;
    let render = if announce {
        RenderService::new(true)
    } else {
        container.render_service()
    };

    let mut sink = container.output_sink()?;
    let emitted = render.draw(&scene, root, &mut sink)?;
    debug!("draw: {} actions", emitted);

    if let Some(path) = &container.settings.render.output {
        output::action("Drawn", &format!("{} actions to {}", emitted, path.display()));
    }
    Ok(())
}

#[instrument]
fn cmd_tree(shapes: &[Shape], nested: bool) -> CliResult<()> {
    let (scene, root) = build_scene(shapes, nested)?;
    output::info(&scene.subtree(root).to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_bench(
    container: &ServiceContainer,
    circles: Option<usize>,
    squares: Option<usize>,
    strategy: StrategyArg,
    print: bool,
) -> CliResult<()> {
    let service = container.benchmark_service(circles, squares);
    let plan = *service.plan();
    output::header(&format!(
        "{} circles (radius {}) + {} squares (side length {})",
        plan.circles, plan.radius, plan.squares, plan.side_length
    ));

    let mut sink: Box<dyn DrawSink> = if print {
        container.output_sink()?
    } else {
        Box::new(CountingSink::new())
    };

    let report = match strategy {
        StrategyArg::Composite => {
            let m = service.run_composite(&mut sink)?;
            print_measurement(&m);
            None
        }
        StrategyArg::Flat => {
            let m = service.run_flat(&mut sink)?;
            print_measurement(&m);
            None
        }
        StrategyArg::Both => {
            let composite = service.run_composite(&mut sink)?;
            let flat = service.run_flat(&mut sink)?;
            Some(BenchmarkReport { composite, flat })
        }
    };

    if let Some(report) = report {
        print_measurement(&report.composite);
        print_measurement(&report.flat);
        if report.counts_match() {
            output::success(&format!(
                "both strategies drew {} leaves",
                report.composite.actions
            ));
        } else {
            output::failure(&format!(
                "action counts differ: composite {}, flat {}",
                report.composite.actions, report.flat.actions
            ));
        }
    }
    Ok(())
}

fn print_measurement(m: &Measurement) {
    output::detail(&format!(
        "{:<9} {} actions, build {:.2?}, draw {:.2?}",
        m.strategy.to_string(),
        m.actions,
        m.build,
        m.draw
    ));
}

#[instrument]
fn cmd_parts(tree: bool) -> CliResult<()> {
    let car = demo::car();
    if tree {
        output::info(&Component::from(car).to_tree_string());
        return Ok(());
    }

    for part in [Part::Transistor, Part::Chip, Part::Valve, Part::Tire] {
        output::info(&format!("{} Price: {}", part, part.price()));
    }
    for name in ["Engine", "Car"] {
        let assembly = demo::find_assembly(&car, name)
            .ok_or_else(|| CliError::Usage(format!("assembly not found: {}", name)))?;
        output::info(&format!("{} Price: {}", assembly.name, assembly.price()));
    }
    Ok(())
}

#[instrument]
fn cmd_accounts(tree: bool) -> CliResult<()> {
    let customer = demo::customer();
    if tree {
        output::info(&AccountComponent::from(customer).to_tree_string());
        return Ok(());
    }

    output::info(&format!(
        "Customer's Total Account Balance: ${}",
        customer.balance()
    ));
    output::info(&customer.statement());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(
    container: &ServiceContainer,
    project_dir: &Path,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            let local = local_config_path(project_dir);
            output::info(
                &[format!("global: {}", global), format!("local:  {}", local.display())]
                    .iter()
                    .join("\n"),
            );
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };
            if path.exists() {
                output::warning(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}
