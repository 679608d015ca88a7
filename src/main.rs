use anyhow::Context;
use gltf_probe::cli::Args;
use gltf_probe::{display_value, inspect, Document, PackDemo};
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse_args();

    let document = Document::open(&args.path)?;
    info!("inspecting {}", args.path.display());

    if let Some(cube) = &args.cube {
        match document.cube_dimension(cube) {
            Some(dim) => println!("Dimension:  {}", display_value(dim)),
            None => println!("Dimension:  None"),
        }
    }

    let inspection = inspect(&document)
        .with_context(|| format!("inspecting {}", args.path.display()))?;
    print!("{}", inspection);

    if args.skip_pack {
        return Ok(());
    }

    println!("A  B  C");
    let demo = PackDemo::run();
    print!("{}", demo);
    println!("1f first byte:  {}", demo.float_native_byte()?);

    Ok(())
}
