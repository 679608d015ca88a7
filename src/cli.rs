use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gltf-probe")]
#[command(about = "Print a few fields of a glTF document and show byte-order packing", long_about = None)]
pub struct Args {
    /// glTF JSON document to inspect
    #[arg(default_value = "arrows.gltf")]
    pub path: PathBuf,

    /// Also print `cubes.<ID>.dim`
    #[arg(long, value_name = "ID")]
    pub cube: Option<String>,

    /// Only inspect the document
    #[arg(long)]
    pub skip_pack: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
