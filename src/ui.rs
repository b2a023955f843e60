use crate::models::{BookingRecord, EventSummary, ShowDateRecord};
use crate::view::{Binding, Rendered, UiAction, UiEvent};
use maud::{Markup, html};

pub const NO_BOOKINGS: &str = "Non hai ancora effettuato prenotazioni.";
pub const BOOKINGS_LOAD_ERROR: &str = "Si è verificato un errore nel caricamento delle prenotazioni.";
pub const NO_SHOW_DATES: &str = "Non ci sono repliche in programma per questo evento.";
pub const SHOW_DATES_LOAD_ERROR: &str = "Si è verificato un errore nel caricamento delle repliche.";

pub fn quantity_input_id(record_id: i64) -> String {
    format!("quantita-{record_id}")
}

pub fn edit_button_id(booking_id: i64) -> String {
    format!("modifica-{booking_id}")
}

pub fn cancel_button_id(booking_id: i64) -> String {
    format!("cancella-{booking_id}")
}

pub fn reserve_form_id(replica_id: i64) -> String {
    format!("prenota-{replica_id}")
}

/// Static paragraph used for empty lists and load failures.
pub fn render_notice(text: &str) -> Rendered {
    Rendered::message(html! { p { (text) } }.into_string())
}

pub fn render_bookings(records: &[BookingRecord]) -> Rendered {
    if records.is_empty() {
        return render_notice(NO_BOOKINGS);
    }

    let markup = html! {
        table.table {
            thead {
                tr {
                    th { "Evento" }
                    th { "Locale" }
                    th { "Data e Ora" }
                    th { "Quantità" }
                    th { "Stato" }
                    th { "Azioni" }
                }
            }
            tbody {
                @for record in records {
                    (booking_row(record))
                }
            }
        }
    };

    let bindings = records
        .iter()
        .filter(|record| !record.cancelled)
        .flat_map(|record| {
            [
                Binding {
                    control_id: edit_button_id(record.id),
                    event: UiEvent::Click,
                    action: UiAction::EditQuantity {
                        booking_id: record.id,
                    },
                },
                Binding {
                    control_id: cancel_button_id(record.id),
                    event: UiEvent::Click,
                    action: UiAction::Cancel {
                        booking_id: record.id,
                    },
                },
            ]
        })
        .collect();

    Rendered {
        markup: markup.into_string(),
        bindings,
    }
}

fn booking_row(record: &BookingRecord) -> Markup {
    html! {
        tr id={ "prenotazione-" (record.id) } {
            td { (record.event_name) }
            td { (record.venue_name) }
            td { (record.date_time) }
            td {
                input type="number" min="1" value=(record.quantity) id=(quantity_input_id(record.id)) disabled[record.cancelled];
            }
            td {
                @if record.cancelled {
                    span.text-danger { "Annullato" }
                } @else {
                    span.text-success { "Confermato" }
                }
            }
            td {
                @if !record.cancelled {
                    button.btn.btn-sm.btn-primary type="button" id=(edit_button_id(record.id)) data-action="update" { "Modifica" }
                    " "
                    button.btn.btn-sm.btn-danger type="button" id=(cancel_button_id(record.id)) data-action="delete" { "Cancella" }
                }
            }
        }
    }
}

pub fn render_event(summary: &EventSummary) -> Rendered {
    let markup = html! {
        h1."mb-4" { "Repliche di \"" (summary.event_name) "\"" }
        h2."mb-3" { (summary.venue_name) }
        p { strong { "Luogo:" } " " (summary.location) }
        @if summary.show_dates.is_empty() {
            p { (NO_SHOW_DATES) }
        } @else {
            div.row {
                @for show_date in &summary.show_dates {
                    (show_date_card(show_date))
                }
            }
        }
    };

    let bindings = summary
        .show_dates
        .iter()
        .filter(|show_date| !show_date.cancelled)
        .map(|show_date| Binding {
            control_id: reserve_form_id(show_date.id),
            event: UiEvent::Submit,
            action: UiAction::Reserve {
                replica_id: show_date.id,
            },
        })
        .collect();

    Rendered {
        markup: markup.into_string(),
        bindings,
    }
}

fn show_date_card(show_date: &ShowDateRecord) -> Markup {
    let max = show_date.available_seats.max(0);
    html! {
        div."col-md-4"."mb-3" id={ "replica-" (show_date.id) } {
            div.card {
                div.card-body {
                    h5.card-title { (show_date.date_time) }
                    p.card-text { "Posti disponibili: " (show_date.available_seats) }
                    @if show_date.cancelled {
                        p.text-danger { "Questa replica è stata annullata." }
                        input.form-control type="number" id=(quantity_input_id(show_date.id)) name="quantita" value="1" min="1" max=(max) disabled;
                    } @else {
                        @if max == 0 {
                            p.text-warning { "Posti esauriti." }
                        } @else {
                            p.text-success { "Disponibile" }
                        }
                        form id=(reserve_form_id(show_date.id)) data-action="create" {
                            div."mb-3" {
                                label.form-label for=(quantity_input_id(show_date.id)) { "Quantità:" }
                                input.form-control type="number" id=(quantity_input_id(show_date.id)) name="quantita" value="1" min="1" max=(max);
                            }
                            button.btn.btn-dark type="submit" { "Prenota" }
                        }
                    }
                }
            }
        }
    }
}
