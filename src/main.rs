use clap::{Parser, Subcommand};
use prenotazioni_client::{
    ActionResult, BookingListController, BookingsListing, ClientConfig, ControllerState,
    HttpTransport, Listing, MemoryView, Rendered, ShowDatesListing, UiAction, UiEvent, View, ui,
};
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "prenotazioni", about = "View and manage event bookings")]
struct Args {
    /// Base URL of the booking server [default: $PRENOTAZIONI_BASE_URL or http://127.0.0.1:5000].
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show your bookings.
    List,
    /// Show the show-dates of an event.
    Repliche { event_id: i64 },
    /// Reserve seats on a show-date of an event.
    Prenota {
        event_id: i64,
        replica_id: i64,
        quantita: String,
    },
    /// Change the number of seats of a booking.
    Modifica { prenotazione_id: i64, quantita: String },
    /// Cancel a booking.
    Cancella {
        prenotazione_id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// Prints every mount to stdout and asks confirmations on the terminal.
struct TerminalView {
    inner: MemoryView,
    assume_yes: bool,
}

impl TerminalView {
    fn new(assume_yes: bool) -> Self {
        Self {
            inner: MemoryView::new(),
            assume_yes,
        }
    }

    fn type_into(&mut self, control_id: &str, value: &str) {
        self.inner.set_input(control_id, value);
    }

    fn trigger(&self, control_id: &str, event: UiEvent) -> Option<UiAction> {
        self.inner.trigger(control_id, event)
    }
}

impl View for TerminalView {
    fn mount(&mut self, content: Rendered) {
        println!("{}", content.markup);
        self.inner.mount(content);
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{question} [s/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sì" | "y" | "yes")
    }

    fn input_value(&self, control_id: &str) -> Option<String> {
        self.inner.input_value(control_id)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args
        .base_url
        .map(ClientConfig::new)
        .unwrap_or_else(ClientConfig::from_env);
    let transport = HttpTransport::new();
    info!("using booking server at {}", config.base_url);

    match args.command {
        Command::List => {
            load(BookingsListing, transport, config, false).await?;
            Ok(())
        }
        Command::Repliche { event_id } => {
            load(ShowDatesListing::new(event_id), transport, config, false).await?;
            Ok(())
        }
        Command::Prenota {
            event_id,
            replica_id,
            quantita,
        } => {
            let mut controller =
                load(ShowDatesListing::new(event_id), transport, config, false).await?;
            controller
                .view_mut()
                .type_into(&ui::quantity_input_id(replica_id), &quantita);
            fire(&mut controller, &ui::reserve_form_id(replica_id), UiEvent::Submit).await
        }
        Command::Modifica {
            prenotazione_id,
            quantita,
        } => {
            let mut controller = load(BookingsListing, transport, config, false).await?;
            controller
                .view_mut()
                .type_into(&ui::quantity_input_id(prenotazione_id), &quantita);
            fire(&mut controller, &ui::edit_button_id(prenotazione_id), UiEvent::Click).await
        }
        Command::Cancella {
            prenotazione_id,
            yes,
        } => {
            let mut controller = load(BookingsListing, transport, config, yes).await?;
            fire(&mut controller, &ui::cancel_button_id(prenotazione_id), UiEvent::Click).await
        }
    }
}

type TerminalController<L> = BookingListController<L, HttpTransport, TerminalView>;

async fn load<L: Listing>(
    listing: L,
    transport: HttpTransport,
    config: ClientConfig,
    assume_yes: bool,
) -> Result<TerminalController<L>, Box<dyn std::error::Error>> {
    let mut controller =
        BookingListController::new(listing, transport, TerminalView::new(assume_yes), config);
    controller.initialize().await;
    if controller.state() == ControllerState::LoadError {
        return Err("unable to load the list".into());
    }
    Ok(controller)
}

async fn fire<L: Listing>(
    controller: &mut TerminalController<L>,
    control_id: &str,
    event: UiEvent,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(action) = controller.view().trigger(control_id, event) else {
        return Err(format!("no active control {control_id}; the record may be cancelled").into());
    };

    match controller.dispatch(action).await {
        ActionResult::Accepted(_) | ActionResult::Declined => Ok(()),
        ActionResult::Rejected(reason) => Err(reason.into()),
        ActionResult::Failed => Err("request failed".into()),
        ActionResult::Invalid => Err("invalid input".into()),
    }
}
