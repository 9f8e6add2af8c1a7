//! # Voxel Terrain Entry Point
//!
//! Runs one headless terrain generation and meshing pass. Set `RUST_LOG` for
//! output and `VOXEL_TERRAIN_CONFIG` to point at a JSON config.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    if let Err(error) = voxel_terrain::run() {
        log::error!("{error}");
        std::process::exit(1);
    }
}
