use std::env;
use std::path::PathBuf;
use std::process;

mod keymap;
mod run;

fn main() {
    env_logger::init();

    let rom = match env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: chip8 <chip8-program>");
            process::exit(1);
        }
    };

    if let Err(e) = run::run(&rom) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
