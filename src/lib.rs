pub mod config;
pub mod controller;
pub mod errors;
pub mod listing;
pub mod models;
pub mod transport;
pub mod ui;
pub mod view;

pub use config::{ClientConfig, resolve_base_url};
pub use controller::{ActionResult, BookingListController, ControllerState};
pub use errors::ClientError;
pub use listing::{BookingsListing, Listing, ShowDatesListing};
pub use models::{BookingRecord, EventSummary, MutationOutcome, MutationRequest, ShowDateRecord};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use view::{Binding, MemoryView, Rendered, UiAction, UiEvent, View};
