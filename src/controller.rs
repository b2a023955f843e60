use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::listing::Listing;
use crate::models::{MutationOutcome, MutationRequest};
use crate::transport::{RawResponse, Transport};
use crate::ui;
use crate::view::{UiAction, View};
use tracing::{debug, error, info, warn};

pub const CONFIRM_CANCEL: &str = "Sei sicuro di voler cancellare questa prenotazione?";
pub const INVALID_QUANTITY: &str = "Quantità non valida.";
pub const RESERVE_FAILED: &str = "Si è verificato un errore durante la prenotazione.";
pub const EDIT_FAILED: &str = "Si è verificato un errore durante la modifica della prenotazione.";
pub const CANCEL_FAILED: &str =
    "Si è verificato un errore durante la cancellazione della prenotazione.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Loading,
    Loaded,
    /// Terminal until [`BookingListController::reload`].
    LoadError,
}

/// How a user action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The server confirmed; the list was fetched again.
    Accepted(String),
    /// The server refused with a reason; the view is untouched.
    Rejected(String),
    /// Transport or decoding failure; the view is untouched.
    Failed,
    /// The user said no to the confirmation prompt.
    Declined,
    /// Nothing usable to send (missing input, non-numeric quantity).
    Invalid,
}

/// Fetches a [`Listing`], draws it into a [`View`] and runs the
/// reserve/edit/cancel actions against the shared mutation endpoint.
pub struct BookingListController<L, T, V> {
    listing: L,
    transport: T,
    view: V,
    config: ClientConfig,
    state: ControllerState,
}

impl<L, T, V> BookingListController<L, T, V>
where
    L: Listing,
    T: Transport,
    V: View,
{
    pub fn new(listing: L, transport: T, view: V, config: ClientConfig) -> Self {
        Self {
            listing,
            transport,
            view,
            config,
            state: ControllerState::Uninitialized,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// First load once the mount point exists. Later calls do nothing.
    pub async fn initialize(&mut self) {
        if self.state != ControllerState::Uninitialized {
            debug!("controller already initialized");
            return;
        }
        self.refresh().await;
    }

    /// Whole-page reload: forget the current state and load again.
    pub async fn reload(&mut self) {
        self.state = ControllerState::Uninitialized;
        self.initialize().await;
    }

    pub async fn refresh(&mut self) {
        if self.state == ControllerState::LoadError {
            debug!("list is in error state; refresh ignored until reload");
            return;
        }

        self.state = ControllerState::Loading;
        let url = self.listing.url(&self.config);
        info!("loading {url}");

        let snapshot = match self.fetch_snapshot(&url).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("failed to load {url}: {err}");
                self.state = ControllerState::LoadError;
                self.view.mount(self.listing.load_error());
                return;
            }
        };

        info!(
            "loaded {} records from {url}",
            self.listing.record_count(&snapshot)
        );
        self.render(&snapshot);
    }

    /// Replace the mount point with a fresh drawing of `snapshot`.
    pub fn render(&mut self, snapshot: &L::Snapshot) {
        self.view.mount(self.listing.render(snapshot));
        self.state = ControllerState::Loaded;
    }

    /// Send `request` and act on the answer: an accepted outcome is shown and
    /// the list reloaded, a rejected one is only shown. Transport failures
    /// are returned untouched for the caller to report.
    pub async fn submit_mutation(
        &mut self,
        request: MutationRequest,
    ) -> Result<MutationOutcome, ClientError> {
        let url = self.config.mutation_url();
        let body = serde_json::to_value(&request)?;
        debug!("sending {} to {url}", request.action());

        let response = self.transport.post_json(&url, &body).await?;
        let outcome = decode_outcome(response)?;

        match &outcome {
            MutationOutcome::Accepted(message) => {
                info!("{} accepted: {message}", request.action());
                self.view.alert(message);
                self.refresh().await;
            }
            MutationOutcome::Rejected(reason) => {
                warn!("{} rejected: {reason}", request.action());
                self.view.alert(reason);
            }
        }

        Ok(outcome)
    }

    pub async fn reserve(&mut self, replica_id: i64) -> ActionResult {
        let input_id = ui::quantity_input_id(replica_id);
        let Some(raw) = self.view.input_value(&input_id) else {
            warn!("no quantity input {input_id}");
            return ActionResult::Invalid;
        };
        let Some(quantita) = parse_quantity(&raw) else {
            warn!("quantity {raw:?} for replica {replica_id} is not a number");
            self.view.alert(INVALID_QUANTITY);
            return ActionResult::Invalid;
        };

        self.run(
            MutationRequest::Create {
                replica_id,
                quantita,
            },
            RESERVE_FAILED,
        )
        .await
    }

    pub async fn edit_quantity(&mut self, booking_id: i64) -> ActionResult {
        let input_id = ui::quantity_input_id(booking_id);
        let Some(quantita) = self.view.input_value(&input_id) else {
            warn!("no quantity input {input_id}");
            return ActionResult::Invalid;
        };

        self.run(
            MutationRequest::Update {
                prenotazione_id: booking_id,
                quantita,
            },
            EDIT_FAILED,
        )
        .await
    }

    pub async fn cancel(&mut self, booking_id: i64) -> ActionResult {
        if !self.view.confirm(CONFIRM_CANCEL) {
            debug!("cancellation of booking {booking_id} declined");
            return ActionResult::Declined;
        }

        self.run(
            MutationRequest::Delete {
                prenotazione_id: booking_id,
            },
            CANCEL_FAILED,
        )
        .await
    }

    /// Entry point for the handlers registered from [`crate::view::Binding`]s.
    pub async fn dispatch(&mut self, action: UiAction) -> ActionResult {
        match action {
            UiAction::Reserve { replica_id } => self.reserve(replica_id).await,
            UiAction::EditQuantity { booking_id } => self.edit_quantity(booking_id).await,
            UiAction::Cancel { booking_id } => self.cancel(booking_id).await,
        }
    }

    async fn run(&mut self, request: MutationRequest, failure: &str) -> ActionResult {
        match self.submit_mutation(request).await {
            Ok(MutationOutcome::Accepted(message)) => ActionResult::Accepted(message),
            Ok(MutationOutcome::Rejected(reason)) => ActionResult::Rejected(reason),
            Err(err) => {
                error!("{failure} {err}");
                self.view.alert(failure);
                ActionResult::Failed
            }
        }
    }

    async fn fetch_snapshot(&self, url: &str) -> Result<L::Snapshot, ClientError> {
        let response = self.transport.get(url).await?;
        response.json()
    }
}

/// A body shaped like `{message}` or `{error}` is an outcome whatever the
/// status; anything else is a failure.
fn decode_outcome(response: RawResponse) -> Result<MutationOutcome, ClientError> {
    match serde_json::from_str::<MutationOutcome>(&response.body) {
        Ok(outcome) => Ok(outcome),
        Err(err) if response.is_success() => Err(ClientError::Decode(err)),
        Err(_) => Err(ClientError::status(response.status, response.body)),
    }
}

/// Leading-integer reading of an input value: `" 3"` and `"3 posti"` give 3.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}
