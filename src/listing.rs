use crate::config::ClientConfig;
use crate::models::{BookingRecord, EventSummary};
use crate::ui;
use crate::view::Rendered;
use serde::de::DeserializeOwned;

/// One list shape the controller can drive: where it is fetched from,
/// what the body decodes to and how it is drawn.
pub trait Listing {
    type Snapshot: DeserializeOwned;

    fn url(&self, config: &ClientConfig) -> String;

    fn render(&self, snapshot: &Self::Snapshot) -> Rendered;

    fn load_error(&self) -> Rendered;

    /// Number of records in a snapshot, for logging.
    fn record_count(&self, snapshot: &Self::Snapshot) -> usize;
}

/// The signed-in user's bookings, drawn as a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingsListing;

impl Listing for BookingsListing {
    type Snapshot = Vec<BookingRecord>;

    fn url(&self, config: &ClientConfig) -> String {
        config.bookings_url()
    }

    fn render(&self, snapshot: &Self::Snapshot) -> Rendered {
        ui::render_bookings(snapshot)
    }

    fn load_error(&self) -> Rendered {
        ui::render_notice(ui::BOOKINGS_LOAD_ERROR)
    }

    fn record_count(&self, snapshot: &Self::Snapshot) -> usize {
        snapshot.len()
    }
}

/// Show-dates of one event, drawn as a header plus a card grid.
#[derive(Debug, Clone, Copy)]
pub struct ShowDatesListing {
    pub event_id: i64,
}

impl ShowDatesListing {
    pub fn new(event_id: i64) -> Self {
        Self { event_id }
    }
}

impl Listing for ShowDatesListing {
    type Snapshot = EventSummary;

    fn url(&self, config: &ClientConfig) -> String {
        config.show_dates_url(self.event_id)
    }

    fn render(&self, snapshot: &Self::Snapshot) -> Rendered {
        ui::render_event(snapshot)
    }

    fn load_error(&self) -> Rendered {
        ui::render_notice(ui::SHOW_DATES_LOAD_ERROR)
    }

    fn record_count(&self, snapshot: &Self::Snapshot) -> usize {
        snapshot.show_dates.len()
    }
}
