use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use prenotazioni_client::{
    ActionResult, BookingListController, BookingsListing, ClientConfig, ControllerState,
    HttpTransport, MemoryView, ShowDatesListing, UiEvent, ui,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct Backend {
    bookings: Vec<Value>,
    show_dates: Vec<Value>,
    fail_list: bool,
    list_calls: usize,
    posted: Vec<Value>,
    next_id: i64,
}

type Shared = Arc<Mutex<Backend>>;

async fn list_bookings(State(backend): State<Shared>) -> Response {
    let mut backend = backend.lock().await;
    backend.list_calls += 1;
    if backend.fail_list {
        return (StatusCode::INTERNAL_SERVER_ERROR, "<h1>Internal Server Error</h1>").into_response();
    }
    Json(Value::Array(backend.bookings.clone())).into_response()
}

async fn mutate(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = backend.lock().await;
    backend.posted.push(body.clone());

    let booking_id = body["prenotazione_id"].as_i64();
    match body["action"].as_str() {
        Some("create") => {
            let replica_id = body["replica_id"].as_i64().unwrap_or_default();
            let quantita = body["quantita"].as_i64().unwrap_or(1);
            backend.next_id += 1;
            let id = backend.next_id;
            backend.bookings.push(json!({
                "id": id,
                "evento": "Nabucco",
                "locale": "Teatro Regio",
                "data_ora": "02-03-2024 20:00",
                "quantita": quantita,
                "annullato": false,
                "replica_id": replica_id
            }));
            for show_date in backend.show_dates.iter_mut() {
                if show_date["id"].as_i64() == Some(replica_id) {
                    let seats = show_date["posti_disponibili"].as_i64().unwrap_or_default();
                    show_date["posti_disponibili"] = json!(seats - quantita);
                }
            }
            (
                StatusCode::CREATED,
                Json(json!({ "message": "Prenotazione effettuata con successo!" })),
            )
                .into_response()
        }
        Some("update") if booking_id == Some(99) => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Non sei autorizzato a modificare questa prenotazione." })),
        )
            .into_response(),
        Some("update") => {
            let quantita = body["quantita"]
                .as_str()
                .and_then(|raw| raw.parse::<i64>().ok());
            let Some(booking) = backend
                .bookings
                .iter_mut()
                .find(|booking| booking["id"].as_i64() == booking_id)
            else {
                return (StatusCode::NOT_FOUND, "<h1>Not Found</h1>").into_response();
            };
            if let Some(quantita) = quantita {
                booking["quantita"] = json!(quantita);
            }
            Json(json!({ "message": "Prenotazione aggiornata con successo!" })).into_response()
        }
        Some("delete") => {
            backend
                .bookings
                .retain(|booking| booking["id"].as_i64() != booking_id);
            Json(json!({ "message": "Prenotazione cancellata con successo!" })).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Azione non valida" })),
        )
            .into_response(),
    }
}

async fn show_dates(Path(event_id): Path<i64>, State(backend): State<Shared>) -> Response {
    if event_id != 6 {
        return (StatusCode::NOT_FOUND, "<h1>Not Found</h1>").into_response();
    }
    let backend = backend.lock().await;
    Json(json!({
        "nome_evento": "Nabucco",
        "locale": "Teatro Regio",
        "luogo": "Parma",
        "repliche": backend.show_dates.clone()
    }))
    .into_response()
}

async fn spawn_backend(backend: Backend) -> (String, Shared) {
    let shared = Arc::new(Mutex::new(backend));
    let app = Router::new()
        .route("/api/prenotazioni", get(list_bookings).post(mutate))
        .route("/api/repliche/:event_id", get(show_dates))
        .with_state(Arc::clone(&shared));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind random port");
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), shared)
}

fn seeded() -> Backend {
    Backend {
        bookings: vec![
            json!({
                "id": 1,
                "evento": "Tosca",
                "locale": "Teatro Verdi",
                "data_ora": "12-05-2024 21:00",
                "quantita": 2,
                "annullato": false,
                "replica_id": 3
            }),
            json!({
                "id": 2,
                "evento": "Aida",
                "locale": "Arena",
                "data_ora": "01-07-2024 20:30",
                "quantita": 4,
                "annullato": true,
                "replica_id": 5
            }),
        ],
        show_dates: vec![
            json!({ "id": 11, "data_ora": "02-03-2024 20:00", "posti_disponibili": 40, "annullato": false }),
            json!({ "id": 12, "data_ora": "03-03-2024 20:00", "posti_disponibili": 40, "annullato": true }),
        ],
        next_id: 100,
        ..Backend::default()
    }
}

#[tokio::test]
async fn http_edit_quantity_updates_and_refetches() {
    let (base_url, backend) = spawn_backend(seeded()).await;
    let mut controller = BookingListController::new(
        BookingsListing,
        HttpTransport::new(),
        MemoryView::new(),
        ClientConfig::new(base_url),
    );

    controller.initialize().await;
    assert_eq!(controller.state(), ControllerState::Loaded);
    assert!(controller.view().markup().contains(r#"id="quantita-2" disabled"#));

    controller.view_mut().set_input(ui::quantity_input_id(1), "5");
    let action = controller
        .view()
        .trigger(&ui::edit_button_id(1), UiEvent::Click)
        .expect("edit control for booking 1");
    let result = controller.dispatch(action).await;

    assert_eq!(
        result,
        ActionResult::Accepted("Prenotazione aggiornata con successo!".to_string())
    );
    let backend = backend.lock().await;
    assert_eq!(
        backend.posted,
        vec![json!({ "action": "update", "prenotazione_id": 1, "quantita": "5" })]
    );
    assert_eq!(backend.list_calls, 2);
    assert!(controller.view().markup().contains(r#"value="5" id="quantita-1""#));
}

#[tokio::test]
async fn http_list_failure_shows_error_message() {
    let (base_url, backend) = spawn_backend(Backend {
        fail_list: true,
        ..seeded()
    })
    .await;
    let mut controller = BookingListController::new(
        BookingsListing,
        HttpTransport::new(),
        MemoryView::new(),
        ClientConfig::new(base_url),
    );

    controller.initialize().await;

    assert_eq!(controller.state(), ControllerState::LoadError);
    assert!(controller.view().markup().contains(ui::BOOKINGS_LOAD_ERROR));
    assert!(!controller.view().markup().contains("<table"));
    assert_eq!(backend.lock().await.list_calls, 1);
}

#[tokio::test]
async fn http_forbidden_update_is_shown_without_refetch() {
    let mut backend = seeded();
    backend.bookings.push(json!({
        "id": 99,
        "evento": "Otello",
        "locale": "Teatro Verdi",
        "data_ora": "20-05-2024 21:00",
        "quantita": 1,
        "annullato": false
    }));
    let (base_url, backend) = spawn_backend(backend).await;
    let mut controller = BookingListController::new(
        BookingsListing,
        HttpTransport::new(),
        MemoryView::new(),
        ClientConfig::new(base_url),
    );
    controller.initialize().await;

    let result = controller.edit_quantity(99).await;

    assert_eq!(
        result,
        ActionResult::Rejected("Non sei autorizzato a modificare questa prenotazione.".to_string())
    );
    assert_eq!(
        controller.view().alerts(),
        ["Non sei autorizzato a modificare questa prenotazione."]
    );
    assert_eq!(backend.lock().await.list_calls, 1);
}

#[tokio::test]
async fn http_cancel_removes_booking_after_confirmation() {
    let (base_url, backend) = spawn_backend(seeded()).await;
    let mut controller = BookingListController::new(
        BookingsListing,
        HttpTransport::new(),
        MemoryView::new(),
        ClientConfig::new(base_url),
    );
    controller.initialize().await;

    controller.view_mut().answer_confirm(false);
    assert_eq!(controller.cancel(1).await, ActionResult::Declined);
    assert!(backend.lock().await.posted.is_empty());

    controller.view_mut().answer_confirm(true);
    let result = controller.cancel(1).await;

    assert!(matches!(result, ActionResult::Accepted(_)));
    assert!(!controller.view().markup().contains("prenotazione-1"));
    assert!(controller.view().markup().contains("prenotazione-2"));
}

#[tokio::test]
async fn http_reserve_on_show_date() {
    let (base_url, backend) = spawn_backend(seeded()).await;
    let mut controller = BookingListController::new(
        ShowDatesListing::new(6),
        HttpTransport::new(),
        MemoryView::new(),
        ClientConfig::new(base_url),
    );
    controller.initialize().await;

    assert!(controller
        .view()
        .trigger(&ui::reserve_form_id(12), UiEvent::Submit)
        .is_none());

    controller.view_mut().set_input(ui::quantity_input_id(11), "3");
    let action = controller
        .view()
        .trigger(&ui::reserve_form_id(11), UiEvent::Submit)
        .expect("reserve form for show-date 11");
    let result = controller.dispatch(action).await;

    assert_eq!(
        result,
        ActionResult::Accepted("Prenotazione effettuata con successo!".to_string())
    );
    assert_eq!(
        backend.lock().await.posted,
        vec![json!({ "action": "create", "replica_id": 11, "quantita": 3 })]
    );
    assert!(controller.view().markup().contains("Posti disponibili: 37"));
}

#[tokio::test]
async fn http_unknown_event_is_a_load_error() {
    let (base_url, _backend) = spawn_backend(seeded()).await;
    let mut controller = BookingListController::new(
        ShowDatesListing::new(404),
        HttpTransport::new(),
        MemoryView::new(),
        ClientConfig::new(base_url),
    );

    controller.initialize().await;

    assert_eq!(controller.state(), ControllerState::LoadError);
    assert!(controller.view().markup().contains(ui::SHOW_DATES_LOAD_ERROR));
}

#[tokio::test]
async fn http_unreachable_server_is_a_load_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind random port");
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut controller = BookingListController::new(
        BookingsListing,
        HttpTransport::new(),
        MemoryView::new(),
        ClientConfig::new(format!("http://{addr}")),
    );

    controller.initialize().await;

    assert_eq!(controller.state(), ControllerState::LoadError);
    assert!(controller.view().markup().contains(ui::BOOKINGS_LOAD_ERROR));
}
