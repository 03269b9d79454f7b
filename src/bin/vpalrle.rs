use clap::Parser;
use log::error;
use palrle::compression::decompress_image;
use show_image::*;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(about = "Visualizes a palrle file", long_about = None)]
#[command(version)]
struct Args {
    /// The path to the palrle file.
    input: PathBuf,
}

#[show_image::main]
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

    let filename = args
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("palrle");

    let window = match create_window(filename, Default::default()) {
        Err(e) => {
            error!("Cannot create window: {}", e);
            process::exit(1);
        }
        Ok(w) => w,
    };

    if let Err(e) = window.set_image(filename, dyn_image) {
        error!("Cannot show image: {}", e);
        process::exit(1);
    }

    let channel = match window.event_channel() {
        Err(e) => {
            error!("Cannot listen to window events: {}", e);
            process::exit(1);
        }
        Ok(c) => c,
    };
    for event in channel {
        if let event::WindowEvent::KeyboardInput(event) = event {
            if event.input.key_code == Some(event::VirtualKeyCode::Escape)
                && event.input.state.is_pressed()
            {
                break;
            }
        }
    }
}
