mod executor;
mod rom_config;

use chip8::emulator::ascii_display;
use std::{env, path::Path, process};

fn main() {
    let mut args = env::args().skip(1);
    let rom = match args.next() {
        Some(rom) => rom,
        None => {
            eprintln!(
                "usage: chip8-bin <rom> [{}]",
                rom_config::profile_names().join("|")
            );
            process::exit(2);
        }
    };
    let profile = args.next().unwrap_or_else(|| "default".to_string());

    let (mut executor, frames) = match rom_config::load_rom(Path::new(&rom), &profile) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let result = executor.run_frames(frames);
    println!("{}", ascii_display::render(executor.vm().display()));
    if let Err(err) = result {
        eprintln!("{}", err);
        process::exit(1);
    }
}
