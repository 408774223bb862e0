use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, EventStream};
use gnosis_tui::app::App;
use gnosis_tui::event::Event;
use gnosis_tui::logging;
use gnosis_tui::tui::{init, restore};
use gnosis_tui::ui::render;
use std::time::Duration;
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;
    let root = std::env::current_dir()?;

    let mut tui = init()?;
    let mut app = App::new(root)?;

    let mut stream = EventStream::new();
    let mut interval = tokio::time::interval(Duration::from_millis(250));

    while app.running {
        tui.draw(|frame| render(&mut app, frame))?;

        let event = tokio::select! {
            _ = interval.tick() => Event::Tick,
            maybe_event = stream.next() => {
                match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                    // Ignore other crossterm events for now
                    Some(Ok(_)) => continue,
                    // If the event stream ends or errors, we'll break the loop
                    Some(Err(_)) | None => break,
                }
            }
        };

        match event {
            Event::Tick => app.on_tick(),
            _ => app.handle_event(event),
        }
    }

    restore()?;
    Ok(())
}
