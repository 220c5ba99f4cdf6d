use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use gmd_core::SupportedVersions;

#[derive(Parser, Debug)]
#[command(
    name = "gmd-cli",
    about = "Convert global mod data saves between .bin and .json",
    version
)]
struct Cli {
    /// Input file: a .bin converts to JSON, a .json converts back to binary
    input: PathBuf,
    /// Output path (defaults to out/global_mod_data.json or .bin)
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let ext = cli
        .input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    match ext {
        "bin" => convert(&cli.input, cli.output, "out/global_mod_data.json", bin_to_json),
        "json" => convert(&cli.input, cli.output, "out/global_mod_data.bin", json_to_bin),
        _ => {
            eprintln!(
                "Invalid file extension. Pass a .bin file to convert to json, or a .json file to convert to bin."
            );
            process::exit(2);
        }
    }
}

fn convert(
    input: &Path,
    output: Option<PathBuf>,
    default_out: &str,
    run: fn(&Path, &Path) -> gmd_core::Result<()>,
) {
    let out = output.unwrap_or_else(|| PathBuf::from(default_out));
    if let Some(dir) = out.parent()
        && !dir.as_os_str().is_empty()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("error creating {}: {}", dir.display(), e);
        process::exit(1);
    }
    if let Err(e) = run(input, &out) {
        eprintln!("error: {e}");
        process::exit(1);
    }
    println!("wrote {}", out.display());
}

fn bin_to_json(input: &Path, out: &Path) -> gmd_core::Result<()> {
    let gmd = gmd_core::from_bin(input, &SupportedVersions::default())?;
    gmd_core::to_json(out, &gmd)
}

fn json_to_bin(input: &Path, out: &Path) -> gmd_core::Result<()> {
    let gmd = gmd_core::from_json(input)?;
    gmd_core::to_bin(out, &gmd)
}
