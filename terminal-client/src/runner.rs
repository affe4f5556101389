use std::time::Duration;

use neon_snake_common::best_score::BestScoreStore;
use neon_snake_common::games::RandomSource;
use neon_snake_common::games::snake::{GamePresenter, GameSession};
use neon_snake_common::log;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::input::ClientCommand;

/// Real time since the previous frame, clamped to `max_delta` so a stalled
/// driver resumes with a few steps instead of a burst.
fn frame_delta(now: Instant, last_frame: Instant, max_delta: Duration) -> Duration {
    now.saturating_duration_since(last_frame).min(max_delta)
}

/// Drives `session` in real time until a quit command arrives or every
/// command sender is gone.
pub async fn run_session<R, S, P>(
    session: &mut GameSession<R, S, P>,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    frames_per_second: u32,
    max_frame_delta: Duration,
) where
    R: RandomSource,
    S: BestScoreStore,
    P: GamePresenter,
{
    let frame_period = Duration::from_secs(1) / frames_per_second.max(1);
    let mut frame_interval = tokio::time::interval(frame_period);
    frame_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_frame = Instant::now();

    loop {
        tokio::select! {
            now = frame_interval.tick() => {
                let elapsed = now.saturating_duration_since(last_frame);
                if elapsed > max_frame_delta {
                    log!("Frame took {}ms, simulating {}ms", elapsed.as_millis(), max_frame_delta.as_millis());
                }
                session.advance(frame_delta(now, last_frame, max_frame_delta));
                last_frame = now;
            }
            command = command_rx.recv() => {
                match command {
                    Some(ClientCommand::Input(input)) => {
                        session.handle_input(input);
                    }
                    Some(ClientCommand::Quit) | None => {
                        log!("Leaving after {} ticks with score {}", session.tick(), session.score());
                        break;
                    }
                }
            }
        }
    }
}
