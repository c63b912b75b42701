use crate::app::render::{render_pin, DisplaySettings};
use crate::core::session::SearchSession;
use crate::domain::model::RequestState;
use crate::domain::ports::GeocodingProvider;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const PROMPT: &str = "Give an address: ";

/// Reads one address per line until EOF, printing loading, error and pin lines.
///
/// Failures are printed and the loop keeps going; only I/O on `out` ends it early.
pub async fn run_interactive<P, R, W>(
    session: &SearchSession<P>,
    input: R,
    out: &mut W,
    settings: DisplaySettings,
) -> anyhow::Result<usize>
where
    P: GeocodingProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut resolved = 0;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        writeln!(out, "Loading...")?;
        match session.submit(&line).await {
            Some(state) => {
                if print_state(&state, out, settings)? {
                    resolved += 1;
                }
            }
            None => tracing::debug!("Superseded response ignored"),
        }
    }

    tracing::info!("Interactive session finished, {} address(es) resolved", resolved);
    Ok(resolved)
}

/// Returns `true` when a pin was printed.
pub fn print_state<W: Write>(
    state: &RequestState,
    out: &mut W,
    settings: DisplaySettings,
) -> anyhow::Result<bool> {
    match state {
        RequestState::Success(result) => {
            let pin = settings.pin(result);
            writeln!(out, "{}", render_pin(&pin, settings.output)?)?;
            Ok(true)
        }
        RequestState::Failed(message) => {
            writeln!(out, "❌ {}", message)?;
            Ok(false)
        }
        RequestState::Idle | RequestState::Loading => Ok(false),
    }
}
