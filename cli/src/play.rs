use anyhow::{Result, bail};
use rand::Rng;
use toothpath_core::{Event, Screen, Session, Tone, ToothStatus};

/// Simulated participant answering quizzes.
pub struct Player {
    pub accuracy: f64,
    pub questions: u32,
}

impl Player {
    fn answer<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        (0..self.questions)
            .filter(|_| rng.random_bool(self.accuracy))
            .count() as u32
    }
}

fn tone_label(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => "success",
        Tone::Info => "info",
        Tone::Warning => "warning",
        Tone::Error => "error",
    }
}

fn print_events<'a>(events: impl IntoIterator<Item = &'a Event>) {
    for event in events {
        println!("    [{}] {event}", tone_label(event.tone()));
    }
}

fn cell_title(session: &Session, position: usize) -> &str {
    session
        .board()
        .cell(position)
        .map(|cell| cell.title.as_str())
        .unwrap_or_default()
}

/// Drives `session` until the goal or `max_steps` interactions. Returns whether
/// the goal was reached.
pub fn run<R: Rng + ?Sized>(
    session: &mut Session,
    player: &Player,
    max_steps: usize,
    rng: &mut R,
    echo: bool,
) -> Result<bool> {
    for _ in 0..max_steps {
        match session.screen() {
            Screen::Goal => return Ok(true),
            Screen::Board => {
                let legal = session.legal_range();
                let Some(result) = session.roll(rng) else {
                    bail!(
                        "no legal roll at cell {}",
                        session.pawn().position() + 1
                    );
                };
                if echo {
                    println!(
                        "turn {:>3}: rolled {} from {:?}, cell {} -> {} ({})",
                        session.pawn().turn(),
                        result.rolled,
                        legal,
                        result.from + 1,
                        result.to + 1,
                        cell_title(session, result.to)
                    );
                    print_events(result.events());
                }
            }
            Screen::Quiz(kind) => {
                let correct = player.answer(rng);
                let outcome = session.answer_quiz(kind, correct, rng)?;
                if echo {
                    println!(
                        "  {kind:?} quiz: {correct}/{} correct, landing on cell {}",
                        player.questions,
                        outcome.landing + 1
                    );
                    print_events(&outcome.events);
                }
            }
            Screen::Gateway(route) => {
                let outcome = session.complete_gateway(route)?;
                if echo {
                    println!("  {route:?} at cell {}", session.pawn().position() + 1);
                    print_events(&outcome.events);
                }
            }
        }
    }

    Ok(session.is_finished())
}

pub fn print_summary(session: &Session) {
    let snapshot = session.snapshot();
    println!();
    println!(
        "finished on cell {} after {} turns with {} tooth coins",
        snapshot.position + 1,
        snapshot.turn,
        snapshot.coins
    );
    println!(
        "{:?} teeth: {}/{} present, {} missing, {} stained, {} damaged, {} prosthetic",
        snapshot.stage,
        snapshot.present,
        snapshot.max,
        snapshot.missing,
        snapshot.count_with(ToothStatus::Stained),
        snapshot.count_with(ToothStatus::Damaged),
        snapshot.count_with(ToothStatus::Prosthetic)
    );
}
