//! Basic example of driving the Sticklink engine.

use sticklink_core::{Difficulty, PresetTable, Session, StickToggle};

fn main() {
    let mut session = Session::new(10, PresetTable::builtin(), Difficulty::Easy);

    println!("Difficulty: {}", session.difficulty());
    println!(
        "Preset {}/{}",
        session.preset_index(),
        session.preset_count()
    );
    print!("Targets:");
    for point in session.active_points().iter() {
        print!(" {}", point);
    }
    println!();
    println!("Budget: {:?}\n", session.budget_remaining());

    // Walk a path from (2, 2) to (3, 5).
    let path = [
        ((2, 2), (3, 2)),
        ((3, 2), (3, 3)),
        ((3, 3), (3, 4)),
        ((3, 4), (3, 5)),
    ];

    for ((x1, y1), (x2, y2)) in path {
        let result = session
            .toggle_stick_between((x1, y1).into(), (x2, y2).into())
            .expect("adjacent in-bounds placement");
        if let StickToggle::Placed { stick, won } = result {
            println!(
                "Placed {} ({} left){}",
                stick,
                session
                    .budget_remaining()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "∞".into()),
                if won { " ... solved!" } else { "" }
            );
        }
    }

    assert!(session.won());
}
