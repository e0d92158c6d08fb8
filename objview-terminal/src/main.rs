/// objview terminal viewer
///
/// Usage: objview-terminal [path/to/model.obj]
///
/// Without a path a unit cube is shown.
/// Controls:
///   - Arrows / WASD, E/R: Rotate
///   - IJKL, U/O: Move
///   - +/-: Scale
///   - P: Toggle parallel/central projection
///   - V: Toggle vertex markers
///   - Q/ESC: Quit

use std::env;
use std::io;
use std::path::Path;

use objview_core::{ErrorCode, Mesh, MeshHolder};
use objview_terminal::{TerminalApp, ViewerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    // Logs go to stderr and are only visible before the alternate screen
    // takes over; set RUST_LOG to see more.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = ViewerConfig::from_env();
    let (program, path) = split_args(env::args());

    let (holder, title) = match path {
        Some(path) => load(&path)?,
        None => {
            eprintln!("Usage: {} <obj-file>", program);
            eprintln!("\nNo OBJ file provided, using default cube...");
            (MeshHolder::with_mesh(Mesh::cube(1.0)), "cube".to_string())
        }
    };

    tracing::info!(
        vertices = holder.vertex_count(),
        edges = holder.edge_count(),
        ?config,
        "starting viewer"
    );

    let mut app = TerminalApp::new(holder, title, config)?;
    app.run()
}

/// Program name (with a fallback for an empty argv) and the optional model path.
fn split_args(mut args: impl Iterator<Item = String>) -> (String, Option<String>) {
    let program = args.next().unwrap_or_else(|| "objview-terminal".to_string());
    (program, args.next())
}

fn load(path: &str) -> io::Result<(MeshHolder, String)> {
    println!("Loading OBJ file: {}", path);

    let mut holder = MeshHolder::new();
    if let Err(err) = holder.load(path) {
        let kind = match err.code() {
            ErrorCode::FileOpenError => io::ErrorKind::NotFound,
            _ => io::ErrorKind::InvalidData,
        };
        return Err(io::Error::new(kind, format!("Failed to load {}: {}", path, err)));
    }

    if let Some(mesh) = holder.current_mesh() {
        if mesh.last_error() != ErrorCode::Success {
            eprintln!("Loaded with warnings: {}", mesh.last_error_message());
        }
        println!(
            "Loaded {} vertices, {} polygons, {} edges",
            mesh.vertex_count(),
            mesh.polygon_count(),
            mesh.edge_count()
        );
    }

    let title = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok((holder, title))
}
