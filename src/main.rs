use std::env;
use std::process;

use batch_rename::tui::{run_tui, ExitIntent};

fn print_usage(program: &str) {
    println!("Usage: {} [.]", program);
    println!();
    println!("Interactive batch renamer: pick files or folders in a directory,");
    println!("order them, and apply a prefix, suffix, or numbering pattern.");
    println!();
    println!("Options:");
    println!("  .              use the current directory without prompting");
    println!("  -h, --help     print this help and exit");
    println!("  -v, --version  print the version and exit");
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() > 2 {
        eprintln!("Error: expected at most one argument");
        print_usage(&args[0]);
        process::exit(1);
    }

    let directory = match args.get(1).map(String::as_str) {
        None => None,
        Some(".") => match env::current_dir() {
            Ok(dir) => Some(dir.to_string_lossy().to_string()),
            Err(e) => {
                eprintln!("Error: could not resolve the current directory: {}", e);
                process::exit(1);
            }
        },
        Some("--help") | Some("-h") => {
            print_usage(&args[0]);
            return;
        }
        Some("--version") | Some("-v") => {
            println!("batch-rename {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Some(other) => {
            eprintln!("Error: unrecognized argument '{}'", other);
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    match run_tui(directory).await {
        Ok(ExitIntent::Quit) => {}
        Ok(ExitIntent::EmptyListing {
            item_kind,
            directory,
        }) => {
            println!("No {} found in {}", item_kind, directory.display());
        }
        Ok(ExitIntent::Fatal(message)) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
