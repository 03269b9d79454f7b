use clap::Parser;
use log::{error, info};
use palrle::coding::deflate::ZlibCompressor;
use palrle::compression::{write_container, Container};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(about = "Compresses an image file to a palrle file", long_about = None)]
#[command(version)]
struct Args {
    /// The input image.
    #[arg(short, long)]
    input: PathBuf,

    /// The output palrle file.
    #[arg(short, long)]
    output: PathBuf,

    /// The zlib compression level, from 0 (none) to 9 (best).
    #[arg(short, long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let dynamic_image = match image::open(&args.input) {
        Ok(d) => d,
        Err(image::ImageError::IoError(e)) => {
            error!("Cannot open {}: {}", args.input.display(), e);
            process::exit(1)
        }
        Err(e) => {
            error!("Cannot decode image: {}", e);
            process::exit(2)
        }
    };

    if dynamic_image.color() != image::ColorType::Rgb8 {
        info!(
            "Converting {:?} image to 8-bit rgb, alpha is dropped",
            dynamic_image.color()
        );
    }
    let image = dynamic_image.into_rgb8();

    let container = match Container::from_image(&image) {
        Ok(c) => c,
        Err(e) => {
            error!("Cannot compress image: {}", e);
            process::exit(e.exit_code())
        }
    };
    info!(
        "Compressing {}x{} image with {} colors...",
        container.width(),
        container.height(),
        container.palette().len()
    );

    let file = match File::create(&args.output) {
        Ok(f) => f,
        Err(e) => {
            error!("Cannot create {}: {}", args.output.display(), e);
            process::exit(1)
        }
    };

    let compressor = ZlibCompressor::new(args.level);
    if let Err(e) = write_container(&container, &compressor, BufWriter::new(file)) {
        error!("Cannot compress image: {}", e);
        process::exit(e.exit_code())
    }

    info!("Image successfully compressed to {}", args.output.display());
}
