use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use latticeview_core::LatticeSettings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Force-directed concept lattice viewer", long_about = None)]
struct Args {
    /// Directory holding the lattice documents (concept-<id>[-full].json)
    #[arg(short, long, default_value = "assets/data")]
    data_dir: PathBuf,

    /// Identifier of the lattice to load
    #[arg(short, long)]
    id: String,

    /// Load the full document variant
    #[arg(long)]
    full: bool,

    /// Resolve same-level node collisions every tick
    #[arg(long)]
    collision_detection: bool,

    /// Hide the attribute labels above the nodes
    #[arg(long)]
    hide_top_labels: bool,

    /// Hide the object labels below the nodes
    #[arg(long)]
    hide_bottom_labels: bool,

    /// Label nodes with their owned sets instead of the full sets
    #[arg(long)]
    collapse_labels: bool,

    /// Base node radius in pixels
    #[arg(long, default_value_t = 18.0)]
    circle_radius: f32,

    /// Target link distance per level of separation
    #[arg(long, default_value_t = 160.0)]
    link_distance: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let settings = LatticeSettings {
        collision_detection: args.collision_detection,
        show_top_labels: !args.hide_top_labels,
        show_bottom_labels: !args.hide_bottom_labels,
        collapse_labels: args.collapse_labels,
        circle_radius: args.circle_radius,
        link_distance: args.link_distance,
        ..LatticeSettings::default()
    };

    tracing::info!(
        data_dir = %args.data_dir.display(),
        id = args.id,
        full = args.full,
        "starting lattice viewer"
    );

    latticeview_gui::run_viewer(args.data_dir, args.id, args.full, settings)
        .map_err(|error| anyhow::anyhow!("viewer exited with an error: {error}"))
}
