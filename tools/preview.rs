//! Preview — interactive generation shell for testing name tables.
//!
//! Usage: preview [--data <dir>] [--seed <n>]
//!
//! Commands:
//!   races                      — list loaded race keys
//!   name <race> [gender]       — generate a name (gender: any/male/female)
//!   npc                        — generate a full NPC
//!   date                       — show the current in-world date
//!   advance day|week|month     — advance the calendar
//!   seed <n>                   — reset the RNG seed
//!   help                       — list commands
//!   quit                       — exit

use namewright::core::calendar::CalendarTracker;
use namewright::core::forge::NameForge;
use namewright::schema::calendar::{CalendarSpec, WorldDate};
use namewright::schema::fragment::GenderFilter;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let mut data_dir = "data".to_string();
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" if i + 1 < args.len() => {
                i += 1;
                data_dir = args[i].clone();
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut forge = match NameForge::builder().data_dir(&data_dir).seed(seed).build() {
        Ok(forge) => forge,
        Err(e) => {
            eprintln!("ERROR: failed to load data from '{}': {}", data_dir, e);
            std::process::exit(1);
        }
    };
    for issue in forge.store().issues() {
        eprintln!("WARNING: race '{}' skipped: {}", issue.race, issue.error);
    }
    println!(
        "Loaded {} races from {} (seed {})",
        forge.store().len(),
        data_dir,
        seed
    );

    let calendar_path = Path::new(&data_dir).join("calendar.json");
    let mut calendar = CalendarSpec::load_from_json(&calendar_path)
        .ok()
        .and_then(|spec| CalendarTracker::new(spec, WorldDate::new(1478, 0, 1)).ok());
    if calendar.is_none() {
        eprintln!(
            "WARNING: no calendar at {}; date commands disabled",
            calendar_path.display()
        );
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_usage(),
            ["races"] => {
                for key in forge.store().race_keys() {
                    println!("  {}", key);
                }
            }
            ["name", race, rest @ ..] => {
                let filter = rest
                    .first()
                    .and_then(|g| g.parse::<GenderFilter>().ok())
                    .unwrap_or(GenderFilter::Any);
                match forge.generate(race, filter) {
                    Ok(name) => {
                        println!("Name: {}", name.text);
                        for meaning in name.meaning_lines() {
                            println!("  {}", meaning);
                        }
                        if let Some(poetic) = name.poetic {
                            println!("Poetic meaning: {}", poetic);
                        }
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            ["npc"] => match forge.generate_npc() {
                Ok(npc) => println!("{}", npc.render(forge.attributes())),
                Err(e) => println!("ERROR: {}", e),
            },
            ["date"] => match calendar {
                Some(ref cal) => println!("{}", cal.date_string()),
                None => println!("Calendar not loaded."),
            },
            ["advance", unit] => match calendar {
                Some(ref mut cal) => {
                    match *unit {
                        "day" => cal.advance_days(1),
                        "week" => cal.advance_week(),
                        "month" => cal.advance_month(),
                        other => {
                            println!("Unknown unit '{}'; use day, week, or month", other);
                            continue;
                        }
                    }
                    println!("{}", cal.date_string());
                }
                None => println!("Calendar not loaded."),
            },
            ["seed", value] => match value.parse::<u64>() {
                Ok(new_seed) => {
                    forge = match NameForge::builder()
                        .data_dir(&data_dir)
                        .seed(new_seed)
                        .build()
                    {
                        Ok(forge) => forge,
                        Err(e) => {
                            eprintln!("ERROR: reload failed: {}", e);
                            std::process::exit(1);
                        }
                    };
                    println!("Seed set to {}", new_seed);
                }
                Err(_) => println!("Seed must be a number"),
            },
            _ => println!("Unknown command; try 'help'"),
        }
    }
}

fn print_usage() {
    println!("Usage: preview [--data <dir>] [--seed <n>]");
    println!();
    println!("Commands:");
    println!("  races                      list loaded race keys");
    println!("  name <race> [gender]       generate a name (gender: any/male/female)");
    println!("  npc                        generate a full NPC");
    println!("  date                       show the current in-world date");
    println!("  advance day|week|month     advance the calendar");
    println!("  seed <n>                   reset the RNG seed");
    println!("  help                       list commands");
    println!("  quit                       exit");
}
