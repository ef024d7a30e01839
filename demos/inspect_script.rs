//! Script inspection demo
//!
//! Loads a `.mlx` filter script and prints each filter with its typed
//! parameters, demonstrating validation and typed access.

use mlxscript_io::read_script;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "decimation.mlx".to_string());
    let script = read_script(&path)?;

    println!("{}: {} filter(s)", path, script.len());
    for filter in &script {
        if filter.params().is_empty() {
            println!("- {}", filter.name);
            continue;
        }
        println!("- {} ({} parameters)", filter.name, filter.param_count());
        for param in filter.params() {
            match param.value.literal() {
                Some(literal) => println!("    {} = {} [{}]", param.name, literal, param.kind()),
                None => println!("    {} [{}]", param.name, param.kind()),
            }
        }
    }
    Ok(())
}
