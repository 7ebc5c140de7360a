use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use rackplan::api::{CmdMessage, MessageLevel, MoveOutcome, WarehouseEditor};
use rackplan::commands::CmdResult;
use rackplan::config::RackplanConfig;
use rackplan::error::{RackError, Result};
use rackplan::ids::UuidIds;
use rackplan::model::{Orientation, Point, Rotation};
use rackplan::store::fs::FileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    editor: WarehouseEditor<FileStore, UuidIds>,
    data_dir: PathBuf,
    config: RackplanConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Grid { size }) => handle_grid(&mut ctx, &size),
        Some(Commands::Add { orientation }) => handle_add(&mut ctx, &orientation),
        Some(Commands::Door) => handle_door(&mut ctx),
        Some(Commands::Move { shelf, x, y }) => handle_move(&mut ctx, &shelf, x, y),
        Some(Commands::Drag { x0, y0, x1, y1 }) => handle_drag(&mut ctx, x0, y0, x1, y1),
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Show { no_grid, rotate }) => handle_show(&mut ctx, no_grid, rotate),
        Some(Commands::Reset) => handle_reset(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("RACKPLAN_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("rackplan=debug")
        } else {
            EnvFilter::new("rackplan=warn")
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "rackplan", "rackplan")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| RackError::Store("Could not determine data directory".to_string()))?,
    };

    let config = RackplanConfig::load(&data_dir);
    let width = cli.width.unwrap_or(config.available_width);

    let store = FileStore::new(data_dir.clone());
    let editor = WarehouseEditor::open(store, UuidIds, width)?
        .with_revert_duration(config.revert_duration());

    Ok(AppContext {
        editor,
        data_dir,
        config,
    })
}

fn handle_grid(ctx: &mut AppContext, size: &str) -> Result<()> {
    let result = ctx.editor.define_grid(size)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, orientation: &str) -> Result<()> {
    let orientation: Orientation = orientation.parse().map_err(RackError::Api)?;
    let result = ctx.editor.add_shelf(orientation)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_door(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.editor.add_door()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, shelf: &str, x: f64, y: f64) -> Result<()> {
    let id = ctx.editor.resolve_shelf(shelf)?;
    let result = ctx.editor.move_shelf(&id, Point::new(x, y))?;
    print_move(&result);
    Ok(())
}

fn handle_drag(ctx: &mut AppContext, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<()> {
    let Some(id) = ctx.editor.begin_drag(Point::new(x0, y0)) else {
        println!("{}", format!("No shelf at ({}, {})", x0, y0).dimmed());
        return Ok(());
    };
    ctx.editor.drag_to(Point::new(x1, y1));
    let result = ctx.editor.end_drag(Point::new(x1, y1))?;
    tracing::debug!(%id, "drag finished");
    print_move(&result);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let Some(grid) = ctx.editor.grid() else {
        println!("{}", "No grid defined. Run `rackplan grid <N>` first.".dimmed());
        return Ok(());
    };

    println!(
        "{}",
        format!(
            "Grid {n}x{n}, {size:.1}px cells, {w:.0}x{h:.0}px",
            n = grid.cell_count,
            size = grid.cell_size(),
            w = grid.width,
            h = grid.height
        )
        .bold()
    );

    let shelves = ctx.editor.shelves();
    if shelves.is_empty() {
        println!("No shelves placed.");
        return Ok(());
    }

    for shelf in shelves {
        let rect = shelf.rect(grid);
        println!(
            "{} {:<5} {:<10} {:<10} {}",
            format!("{:<34}", shelf.id).yellow(),
            shelf.kind(),
            shelf.orientation.to_string(),
            shelf.origin().to_string(),
            format!(
                "x={:.0} y={:.0} w={:.0} h={:.0}",
                rect.x, rect.y, rect.width, rect.height
            )
            .dimmed()
        );
    }
    Ok(())
}

fn handle_show(ctx: &mut AppContext, no_grid: bool, rotate: u16) -> Result<()> {
    let rotation = Rotation::from_degrees(rotate).ok_or_else(|| {
        RackError::Api(format!("Rotation must be 0, 90, 180 or 270, got {}", rotate))
    })?;
    if no_grid && ctx.editor.show_grid() {
        ctx.editor.toggle_grid();
    }
    while ctx.editor.rotation() != rotation {
        ctx.editor.rotate_view();
    }
    match ctx.editor.text_map()? {
        Some(map) => println!("{}", map),
        None => println!("{}", "No grid defined. Run `rackplan grid <N>` first.".dimmed()),
    }
    Ok(())
}

fn handle_reset(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.editor.reset()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            println!("width = {}", ctx.config.available_width);
            println!("revert-ms = {}", ctx.config.revert_ms);
        }
        (Some("width"), None) => println!("width = {}", ctx.config.available_width),
        (Some("revert-ms"), None) => println!("revert-ms = {}", ctx.config.revert_ms),
        (Some("width"), Some(v)) => {
            ctx.config.set_available_width(&v)?;
            ctx.config.save(&ctx.data_dir)?;
            let result = ctx.editor.resize(ctx.config.available_width)?;
            print_messages(&result.messages);
            println!("{}", format!("width = {}", ctx.config.available_width).green());
        }
        (Some("revert-ms"), Some(v)) => {
            ctx.config.set_revert_ms(&v)?;
            ctx.config.save(&ctx.data_dir)?;
            println!("{}", format!("revert-ms = {}", ctx.config.revert_ms).green());
        }
        (Some(other), _) => {
            return Err(RackError::Api(format!(
                "Unknown config key: {} (expected width or revert-ms)",
                other
            )));
        }
    }
    Ok(())
}

fn print_move(result: &CmdResult) {
    print_messages(&result.messages);
    if let Some(MoveOutcome::Reverted { to, duration, .. }) = &result.outcome {
        println!(
            "{}",
            format!(
                "snap back to x={:.0} y={:.0} over {}ms",
                to.x,
                to.y,
                duration.as_millis()
            )
            .dimmed()
        );
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}
