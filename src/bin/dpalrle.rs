use clap::Parser;
use log::{error, info};
use palrle::compression::decompress_image;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(about = "Decompresses a palrle file to another image file", long_about = None)]
#[command(version)]
struct Args {
    /// The input palrle file.
    #[arg(short, long)]
    input: PathBuf,

    /// The output file. The output format will be determined using
    /// the extension of the output file.
    #[arg(short, long)]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let input_file = match File::open(&args.input) {
        Err(e) => {
            error!("Cannot open input file: {}", e);
            process::exit(1);
        }
        Ok(f) => f,
    };

    let reader = BufReader::new(input_file);

    let dyn_image = match decompress_image(reader) {
        Err(error) => {
            error!("Error while decompressing the image: {}", error);
            process::exit(error.exit_code())
        }
        Ok(d) => d,
    };
    info!(
        "Decompressed {}x{} image",
        dyn_image.width(),
        dyn_image.height()
    );

    if let Err(e) = dyn_image.save(&args.output) {
        error!("Cannot save image: {}", e);
        process::exit(1)
    }

    info!("Image successfully reconstructed: {}", args.output.display());
}
