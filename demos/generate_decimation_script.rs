//! Script generation demo
//!
//! Builds the two-step decimation pipeline (quadric edge collapse followed
//! by triangulation) for a given face budget and saves it as a `.mlx` file
//! that the mesh tool can run in batch mode.

use mlxscript_core::{pure_triangular, FilterScript, QuadricDecimation};
use mlxscript_io::ScriptWriter;

fn main() -> anyhow::Result<()> {
    let target_faces: i32 = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(1000);

    let mut script = FilterScript::new();
    script.push(QuadricDecimation::with_target_faces(target_faces).to_filter());
    script.push(pure_triangular());

    let path = "decimation.mlx";
    ScriptWriter::write_script(&script, path)?;

    println!("Wrote {} with {} filters", path, script.len());
    println!("- target: {} faces", target_faces);
    Ok(())
}
