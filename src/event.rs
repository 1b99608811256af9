// src/event.rs

use crate::app::TaskOutcome;
use crossterm::event::{self, Event as CEvent};
use log::warn;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Terminal input or a redraw tick.
#[derive(Debug)]
pub enum Event {
    Input(CEvent),
    Tick,
}

/// What the UI loop should handle next.
#[derive(Debug)]
pub enum Step {
    Event(Event),
    Outcome(TaskOutcome),
    /// The input source is gone; the loop must stop.
    Closed,
}

/// Polls crossterm on a background task and forwards input plus ticks.
/// The receiver closes when polling fails.
pub fn spawn_input_poller(tick_rate: Duration) -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>(100);

    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            match event::poll(timeout) {
                Ok(true) => {
                    if let Ok(event) = event::read() {
                        if tx.send(Event::Input(event)).await.is_err() {
                            return;
                        }
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Terminal event poll failed: {}", e);
                    return;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    rx
}

/// Waits for the next input event or background outcome. A closed input
/// channel ends the loop even while outcome senders are still alive.
pub async fn next_step(
    events: &mut mpsc::Receiver<Event>,
    outcomes: &mut mpsc::UnboundedReceiver<TaskOutcome>,
) -> Step {
    tokio::select! {
        event = events.recv() => match event {
            Some(event) => Step::Event(event),
            None => Step::Closed,
        },
        Some(outcome) = outcomes.recv() => Step::Outcome(outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoodAnalysis;

    #[tokio::test]
    async fn test_closed_input_stops_loop_while_outcomes_open() {
        let (tx, mut events) = mpsc::channel::<Event>(4);
        let (_outcome_tx, mut outcomes) = mpsc::unbounded_channel::<TaskOutcome>();
        drop(tx);

        let step = tokio::time::timeout(Duration::from_secs(1), next_step(&mut events, &mut outcomes))
            .await
            .expect("next_step should not hang");
        assert!(matches!(step, Step::Closed));
    }

    #[tokio::test]
    async fn test_outcome_is_delivered() {
        let (_tx, mut events) = mpsc::channel::<Event>(4);
        let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();
        outcome_tx
            .send(TaskOutcome::Mood(MoodAnalysis::default()))
            .unwrap();

        let step = next_step(&mut events, &mut outcomes).await;
        assert!(matches!(step, Step::Outcome(TaskOutcome::Mood(_))));
    }

    #[tokio::test]
    async fn test_tick_is_delivered() {
        let (tx, mut events) = mpsc::channel::<Event>(4);
        let (_outcome_tx, mut outcomes) = mpsc::unbounded_channel::<TaskOutcome>();
        tx.send(Event::Tick).await.unwrap();

        let step = next_step(&mut events, &mut outcomes).await;
        assert!(matches!(step, Step::Event(Event::Tick)));
    }
}
