//! Tavern Roster — fills a roadside tavern with generated patrons.
//!
//! Run with: cargo run --example tavern_roster

use namewright::core::calendar::CalendarTracker;
use namewright::core::forge::NameForge;
use namewright::schema::calendar::{CalendarSpec, WorldDate};
use namewright::schema::fragment::GenderFilter;

fn main() {
    let mut forge = NameForge::builder()
        .data_dir("data")
        .seed(2026)
        .build()
        .expect("Failed to load data tables");

    let spec = CalendarSpec::load_from_json("data/calendar.json")
        .expect("Failed to load calendar");
    let mut calendar = CalendarTracker::new(spec, WorldDate::new(1478, 0, 28))
        .expect("Bad start date");

    println!("=== The Leaning Lantern, {} ===\n", calendar.date_string());

    // A few patrons by name only.
    for race in ["elf", "orc", "halfling", "draconic", "kenku"] {
        let name = forge
            .generate(race, GenderFilter::Any)
            .expect("generation failed");
        print!("At the bar, {} ({})", name.text, race);
        if let Some(poetic) = &name.poetic {
            print!(" — \"{}\"", poetic);
        }
        println!();
    }

    // Three fully fleshed-out regulars.
    println!("\n=== Regulars ===");
    for _ in 0..3 {
        let npc = forge.generate_npc().expect("NPC generation failed");
        println!("\n{}", npc.render(forge.attributes()));
    }

    // The week passes; the month rolls over.
    calendar.advance_week();
    println!("\nA week later it is {}.", calendar.date_string());
}
