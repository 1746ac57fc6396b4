//! Generates transcript JSON files for the headless host.
//!
//! Usage:
//!   cargo run -p boxbrawl-core --example gen-transcript -- [idle|brawl|trade] > transcript.json

use boxbrawl_core::*;

fn press(player: PlayerId, action: Action) -> InputEvent {
    InputEvent::Press(player, action)
}

fn release(player: PlayerId, action: Action) -> InputEvent {
    InputEvent::Release(player, action)
}

/// Player one walks into player two, who stands still.
fn approach(t: &mut Transcript) {
    t.push(vec![press(PlayerId::One, Action::MoveRight)]);
    t.idle(100);
    t.push(vec![release(PlayerId::One, Action::MoveRight)]);
}

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());

    let mut transcript = Transcript::new(default_config());

    match mode.as_str() {
        "idle" => {
            // Nobody moves; the match never ends
            transcript.idle(600);
        }
        "brawl" => {
            // P1 closes in and punches until P2 drops
            approach(&mut transcript);
            for _ in 0..(MAX_HEALTH / PUNCH_DAMAGE) {
                transcript.push(vec![
                    press(PlayerId::One, Action::Punch),
                    release(PlayerId::One, Action::Punch),
                ]);
                transcript.idle(PUNCH_COOLDOWN as usize - 1);
            }
            // Linger on the end screen
            transcript.idle(60);
        }
        "trade" => {
            // Both swing on the same ticks — ends in a draw
            approach(&mut transcript);
            for _ in 0..(MAX_HEALTH / PUNCH_DAMAGE) {
                transcript.push(vec![
                    press(PlayerId::One, Action::Punch),
                    press(PlayerId::Two, Action::Punch),
                    release(PlayerId::One, Action::Punch),
                    release(PlayerId::Two, Action::Punch),
                ]);
                transcript.idle(PUNCH_COOLDOWN as usize - 1);
            }
        }
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'brawl', or 'trade'", mode);
            std::process::exit(1);
        }
    }

    // Verify by running the sim
    let state = replay(&transcript).expect("default config is valid");

    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Frames: {}", transcript.len());
    eprintln!("Final tick: {}", state.tick);
    eprintln!("Match over: {}", state.match_over);
    match state.outcome {
        Some(outcome) => eprintln!("Outcome: {}", outcome),
        None => eprintln!("Outcome: none"),
    }
    eprintln!(
        "Health: P1={}, P2={}",
        state.players[0].health, state.players[1].health
    );

    println!("{}", serde_json::to_string(&transcript).unwrap());
}
