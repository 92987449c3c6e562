use clap::Parser;
use nav_history::app::NavigationSettings;
use nav_history::input::parse_line;
use nav_history::Browser;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nav-history")]
#[command(about = "Replay back/forward navigation commands against an in-memory browser")]
struct Args {
    /// Command script to replay (reads stdin when omitted)
    script: Option<PathBuf>,

    /// Do not record visited pages (private browsing)
    #[arg(long = "no-history", default_value_t = false, action = clap::ArgAction::SetTrue)]
    no_history: bool,

    /// Do not keep the page being left when jumping back or forward
    #[arg(long = "no-fold", default_value_t = false, action = clap::ArgAction::SetTrue)]
    no_fold: bool,

    /// Page opened by every new tab
    #[arg(long = "home")]
    home: Option<String>,

    /// Continue with the next line after a failing command
    #[arg(long = "keep-going", default_value_t = false, action = clap::ArgAction::SetTrue)]
    keep_going: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let settings = NavigationSettings {
        record_history: !args.no_history,
        fold_current: !args.no_fold,
        home: args.home.clone(),
    };

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error: cannot open {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut browser = Browser::new(settings);
    let mut failures = 0;

    for (number, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error: failed to read input: {}", e);
                std::process::exit(1);
            }
        };

        let result = match parse_line(&line) {
            Ok(Some(action)) => browser.dispatch(action).map_err(|e| e.to_string()),
            Ok(None) => continue,
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(outcome) => println!("[tab {}] {}", browser.active_tab, outcome),
            Err(e) => {
                eprintln!("line {}: {}", number + 1, e);
                failures += 1;
                if !args.keep_going {
                    std::process::exit(1);
                }
            }
        }
    }

    if failures > 0 {
        log::warn!("{} command(s) failed", failures);
        std::process::exit(1);
    }
}
